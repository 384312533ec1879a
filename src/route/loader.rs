//! Route loader - YAML file loading and parsing
//!
//! This module handles loading route state (variables and trackers) from
//! YAML files.

use std::fs;
use std::path::Path;

use super::state::RouteState;
use crate::error::RouteError;
use crate::tracker::Tracker;

/// Highest level an observation can be recorded at
const MAX_LEVEL: u16 = 100;

/// Loads route state from YAML files
pub struct RouteLoader;

impl RouteLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load route state from a YAML file
    pub fn load_route<P: AsRef<Path>>(&self, path: P) -> Result<RouteState, RouteError> {
        let path = path.as_ref();
        log::debug!("Loading route state from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse route state from a YAML string
    pub fn parse_yaml(content: &str) -> Result<RouteState, RouteError> {
        let mut state: RouteState = serde_yaml::from_str(content)?;
        state.name_trackers();
        for tracker in state.trackers.values() {
            Self::validate_tracker(tracker)?;
            if !tracker.is_ordered() {
                log::warn!(
                    "Observations for {} are not ordered by level",
                    tracker.name
                );
            }
        }
        Ok(state)
    }

    fn validate_tracker(tracker: &Tracker) -> Result<(), RouteError> {
        if tracker.base_stats.is_empty() && !tracker.observations.is_empty() {
            return Err(RouteError::config(format!(
                "Tracker {} has observations but no base stats",
                tracker.name
            )));
        }
        if let Some(obs) = tracker
            .observations
            .iter()
            .find(|obs| obs.level == 0 || obs.level > MAX_LEVEL)
        {
            return Err(RouteError::config(format!(
                "Tracker {} has an observation at level {}, expected 1-{}",
                tracker.name, obs.level, MAX_LEVEL
            )));
        }
        Ok(())
    }
}

impl Default for RouteLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::VariableKind;

    #[test]
    fn test_parse_route() {
        let yaml = r#"
variables:
  badges:
    type: number
    value: "2"
trackers:
  Mudkip:
    base_stats:
      - { hp: 50, atk: 70, def: 50, spa: 50, spd: 50, spe: 40 }
    observations:
      - level: 5
        stats: { hp: 20, atk: 12, def: 10, spa: 10, spd: 10, spe: 9 }
"#;
        let state = RouteLoader::parse_yaml(yaml).unwrap();
        assert_eq!(state.variables["badges"].kind, VariableKind::Number);
        assert_eq!(state.variables["badges"].value, "2");

        let tracker = state.tracker("Mudkip").unwrap();
        assert_eq!(tracker.name, "Mudkip");
        assert_eq!(tracker.base_stats[0].atk, 70);
        assert_eq!(tracker.observations.len(), 1);
    }

    #[test]
    fn test_explicit_name_is_kept() {
        let yaml = r#"
trackers:
  starter:
    name: Mudkip
    base_stats: []
"#;
        let state = RouteLoader::parse_yaml(yaml).unwrap();
        assert_eq!(state.trackers["starter"].name, "Mudkip");
    }

    #[test]
    fn test_empty_document() {
        let state = RouteLoader::parse_yaml("{}").unwrap();
        assert!(state.variables.is_empty());
        assert!(state.trackers.is_empty());
    }

    #[test]
    fn test_invalid_yaml_returns_error() {
        let yaml = r#"
variables:
  badges:
    type: decimal
    value: "2"
"#;
        let result = RouteLoader::parse_yaml(yaml);
        assert!(matches!(result, Err(RouteError::Yaml(_))));
    }

    #[test]
    fn test_invalid_tracker_is_config_error() {
        let yaml = r#"
trackers:
  Mudkip:
    base_stats:
      - { hp: 50, atk: 70, def: 50, spa: 50, spd: 50, spe: 40 }
    observations:
      - level: 101
        stats: { hp: 20 }
"#;
        let err = RouteLoader::parse_yaml(yaml).unwrap_err();
        assert!(matches!(err, RouteError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: Tracker Mudkip has an observation at level 101, expected 1-100"
        );

        let yaml = r#"
trackers:
  Mudkip:
    base_stats: []
    observations:
      - level: 5
        stats: { hp: 20 }
"#;
        assert!(matches!(
            RouteLoader::parse_yaml(yaml),
            Err(RouteError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = RouteLoader::new().load_route("/nonexistent/route.yaml");
        assert!(matches!(result, Err(RouteError::Io(_))));
    }
}
