// SPDX-License-Identifier: MIT

//! Conditional route blocks
//!
//! A block names a tracker (`source`), a condition and optionally the level
//! and evolution stage the condition applies at. Resolving it decides whether
//! the block's content is shown, hidden, or replaced by an error message.

use serde::{Deserialize, Serialize};

use super::state::RouteState;
use crate::condition::{evaluate_condition, format_condition, parse, Environment};
use crate::error::RouteError;

/// Attributes of a conditional block, as written in route content
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlockProps {
    pub source: Option<String>,
    pub condition: Option<String>,
    pub level: Option<String>,
    pub evolution: Option<String>,
}

/// What a conditional block renders as
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum BlockOutcome {
    /// Condition is not (yet) known to hold
    Hidden,
    /// Condition holds; `header` describes it
    Shown { header: String },
    /// The block cannot be evaluated
    Error { message: String },
}

impl BlockProps {
    pub fn new(source: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            condition: Some(condition.into()),
            level: None,
            evolution: None,
        }
    }

    pub fn at_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn at_evolution(mut self, evolution: impl Into<String>) -> Self {
        self.evolution = Some(evolution.into());
        self
    }
}

impl BlockOutcome {
    fn error(message: impl Into<String>) -> Self {
        BlockOutcome::Error {
            message: message.into(),
        }
    }
}

/// Numeric coercion for level/evolution attributes
///
/// Missing text is NaN, blank text is zero, anything else must be a decimal.
pub fn parse_context_number(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        None => f64::NAN,
        Some("") => 0.0,
        Some(text) => text.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Decide how a conditional block renders against the route state
pub fn resolve_block(props: &BlockProps, state: &RouteState) -> BlockOutcome {
    let Some(source) = props.source.as_deref().filter(|s| !s.is_empty()) else {
        return BlockOutcome::error("The source attribute must be specified.");
    };
    let Some(condition) = props.condition.as_deref().filter(|c| !c.is_empty()) else {
        return BlockOutcome::error("The condition attribute must be specified.");
    };
    let tracker = match state.tracker(source) {
        Ok(tracker) => tracker,
        Err(e) => return BlockOutcome::error(e.to_string()),
    };

    let level = parse_context_number(props.level.as_deref());
    let evolution = parse_context_number(Some(props.evolution.as_deref().unwrap_or("0")));

    let env = match Environment::for_tracker(tracker, level, evolution) {
        Ok(env) => env,
        Err(e) => {
            return BlockOutcome::error(format!(
                "{} has inconsistent observations: {}",
                source, e
            ))
        }
    };

    match check(condition, env, state) {
        Ok(Some(canonical)) => {
            let mut header = format!("Condition met: {}", canonical);
            if let Some(level) = props.level.as_deref().filter(|l| !l.is_empty()) {
                header.push_str(&format!(" at Lv. {}", level));
            }
            BlockOutcome::Shown { header }
        }
        Ok(None) => BlockOutcome::Hidden,
        Err(e) => {
            log::debug!("Condition '{}' failed: {}", condition, e);
            BlockOutcome::error(format!(
                "{} is not a valid conditional statement: {}",
                condition, e
            ))
        }
    }
}

/// Canonical form of the condition if it holds
fn check(condition: &str, env: Environment, state: &RouteState) -> Result<Option<String>, RouteError> {
    let expr = parse(condition)?;
    let env = env.with_variables(state.typed_variables()?);
    if evaluate_condition(&expr, &env)? {
        Ok(Some(format_condition(&expr)))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::VariableKind;
    use crate::route::VariableDecl;
    use crate::tracker::{Observation, StatLine, Tracker};

    /// Level 100 Adamant with IV 31 everywhere
    fn route() -> RouteState {
        RouteState::new()
            .declare("badges", VariableDecl::new(VariableKind::Number, "4"))
            .track(
                Tracker::new("Flat", vec![StatLine::splat(100)]).observe(Observation::new(
                    100,
                    0,
                    StatLine::new(341, 259, 236, 212, 236, 236),
                )),
            )
    }

    #[test]
    fn test_shown_with_header() {
        let props = BlockProps::new("Flat", "trait=='adamant'&&HP>=31").at_level("16");
        assert_eq!(
            resolve_block(&props, &route()),
            BlockOutcome::Shown {
                header: r#"Condition met: trait == "adamant" && HP >= 31 at Lv. 16"#.to_string()
            }
        );
    }

    #[test]
    fn test_header_without_level() {
        let props = BlockProps::new("Flat", "badges > 3");
        assert_eq!(
            resolve_block(&props, &route()),
            BlockOutcome::Shown {
                header: "Condition met: badges > 3".to_string()
            }
        );
    }

    #[test]
    fn test_hidden() {
        let props = BlockProps::new("Flat", "SpA > 20").at_level("30");
        assert_eq!(resolve_block(&props, &route()), BlockOutcome::Hidden);
    }

    #[test]
    fn test_missing_attributes() {
        let state = route();
        let mut props = BlockProps::new("Flat", "true");
        props.source = None;
        assert_eq!(
            resolve_block(&props, &state),
            BlockOutcome::error("The source attribute must be specified.")
        );

        let props = BlockProps::new("", "true");
        assert_eq!(
            resolve_block(&props, &state),
            BlockOutcome::error("The source attribute must be specified.")
        );

        let mut props = BlockProps::new("Flat", "true");
        props.condition = None;
        assert_eq!(
            resolve_block(&props, &state),
            BlockOutcome::error("The condition attribute must be specified.")
        );
    }

    #[test]
    fn test_unknown_tracker() {
        let props = BlockProps::new("Treecko", "true");
        assert_eq!(
            resolve_block(&props, &route()),
            BlockOutcome::error("No IV table with the name Treecko exists.")
        );
    }

    #[test]
    fn test_invalid_condition() {
        let props = BlockProps::new("Flat", "level >");
        match resolve_block(&props, &route()) {
            BlockOutcome::Error { message } => {
                assert!(message.starts_with("level > is not a valid conditional statement: "));
                assert!(message.contains("missing right operand"));
            }
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_level_is_nan() {
        let props = BlockProps::new("Flat", "level >= 16");
        assert!(matches!(
            resolve_block(&props, &route()),
            BlockOutcome::Error { .. }
        ));
    }

    #[test]
    fn test_inconsistent_tracker() {
        let state = RouteState::new().track(
            Tracker::new("Broken", vec![StatLine::splat(100)])
                .observe(Observation::new(100, 0, StatLine::splat(1))),
        );
        match resolve_block(&BlockProps::new("Broken", "true"), &state) {
            BlockOutcome::Error { message } => {
                assert!(message.starts_with("Broken has inconsistent observations"))
            }
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_context_number() {
        assert!(parse_context_number(None).is_nan());
        assert_eq!(parse_context_number(Some("")), 0.0);
        assert_eq!(parse_context_number(Some(" 16 ")), 16.0);
        assert!(parse_context_number(Some("sixteen")).is_nan());
    }
}
