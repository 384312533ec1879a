// SPDX-License-Identifier: MIT

//! Typed values and variable casting

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypeCastError;

/// A scalar value produced by literals, variables and context lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    Number(f64),
    Text(String),
    Boolean(bool),
}

/// Declared kind of a route variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Number,
    #[serde(alias = "string")]
    Text,
    #[serde(alias = "bool")]
    Boolean,
}

impl TypedValue {
    /// Kind name used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypedValue::Number(_) => "number",
            TypedValue::Text(_) => "text",
            TypedValue::Boolean(_) => "boolean",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Number(n) => write!(f, "{}", n),
            TypedValue::Text(s) => write!(f, "{}", s),
            TypedValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Number => write!(f, "number"),
            VariableKind::Text => write!(f, "text"),
            VariableKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// Convert raw variable text to a value of the declared kind
pub fn cast(kind: VariableKind, raw: &str) -> Result<TypedValue, TypeCastError> {
    match kind {
        VariableKind::Text => Ok(TypedValue::Text(raw.to_string())),
        VariableKind::Number => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(TypedValue::Number)
            .ok_or_else(|| TypeCastError::new(kind, raw)),
        VariableKind::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(TypedValue::Boolean(true)),
            "false" => Ok(TypedValue::Boolean(false)),
            _ => Err(TypeCastError::new(kind, raw)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_number() {
        assert_eq!(cast(VariableKind::Number, "12"), Ok(TypedValue::Number(12.0)));
        assert_eq!(cast(VariableKind::Number, " 2.5 "), Ok(TypedValue::Number(2.5)));
        assert_eq!(cast(VariableKind::Number, "-3"), Ok(TypedValue::Number(-3.0)));
    }

    #[test]
    fn test_cast_number_failures() {
        let err = cast(VariableKind::Number, "abc").unwrap_err();
        assert_eq!(err.kind, VariableKind::Number);
        assert_eq!(err.raw, "abc");

        assert!(cast(VariableKind::Number, "").is_err());
        assert!(cast(VariableKind::Number, "NaN").is_err());
        assert!(cast(VariableKind::Number, "inf").is_err());
    }

    #[test]
    fn test_cast_boolean() {
        assert_eq!(cast(VariableKind::Boolean, "true"), Ok(TypedValue::Boolean(true)));
        assert_eq!(cast(VariableKind::Boolean, "FALSE"), Ok(TypedValue::Boolean(false)));
        assert!(cast(VariableKind::Boolean, "yes").is_err());
    }

    #[test]
    fn test_cast_text_keeps_raw() {
        assert_eq!(
            cast(VariableKind::Text, "  Mudkip "),
            Ok(TypedValue::Text("  Mudkip ".to_string()))
        );
    }

    #[test]
    fn test_variable_kind_deserialize() {
        let kinds: Vec<VariableKind> =
            serde_yaml::from_str("[number, text, string, boolean, bool]").unwrap();
        assert_eq!(
            kinds,
            vec![
                VariableKind::Number,
                VariableKind::Text,
                VariableKind::Text,
                VariableKind::Boolean,
                VariableKind::Boolean
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TypedValue::Number(12.0).to_string(), "12");
        assert_eq!(TypedValue::Number(0.5).to_string(), "0.5");
        assert_eq!(TypedValue::Boolean(true).to_string(), "true");
    }
}
