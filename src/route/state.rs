// SPDX-License-Identifier: MIT

//! Route-wide state: declared variables and tracked entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::condition::{cast, TypedValue, VariableKind};
use crate::error::{RouteError, TypeCastError};
use crate::tracker::Tracker;

/// A variable as declared by the route author
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VariableDecl {
    #[serde(rename = "type")]
    pub kind: VariableKind,
    /// Raw text, cast to `kind` when conditions are evaluated
    pub value: String,
}

/// Variables and trackers shared by every conditional block of a route
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RouteState {
    #[serde(default)]
    pub variables: HashMap<String, VariableDecl>,
    #[serde(default)]
    pub trackers: HashMap<String, Tracker>,
}

impl VariableDecl {
    pub fn new(kind: VariableKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl RouteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(mut self, name: impl Into<String>, decl: VariableDecl) -> Self {
        self.variables.insert(name.into(), decl);
        self
    }

    /// Add a tracker, keyed by its name
    pub fn track(mut self, tracker: Tracker) -> Self {
        self.trackers.insert(tracker.name.clone(), tracker);
        self
    }

    /// Look up a tracker by name
    pub fn tracker(&self, name: &str) -> Result<&Tracker, RouteError> {
        self.trackers
            .get(name)
            .ok_or_else(|| RouteError::UnknownTracker(name.to_string()))
    }

    /// Cast every declared variable to its declared kind
    pub fn typed_variables(&self) -> Result<HashMap<String, TypedValue>, TypeCastError> {
        self.variables
            .iter()
            .map(|(name, decl)| {
                cast(decl.kind, &decl.value)
                    .map(|value| (name.clone(), value))
                    .map_err(|e| e.for_variable(name.as_str()))
            })
            .collect()
    }

    /// Fill in tracker names from their map keys
    pub(crate) fn name_trackers(&mut self) {
        for (name, tracker) in self.trackers.iter_mut() {
            if tracker.name.is_empty() {
                tracker.name = name.clone();
            }
        }
    }
}
