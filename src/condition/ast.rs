// SPDX-License-Identifier: MIT

//! Abstract Syntax Tree for condition expressions

use super::value::TypedValue;
use crate::tracker::Stat;

/// A condition expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Number, text or boolean literal
    Literal(TypedValue),
    /// Route variable, resolved at evaluation time
    Variable(String),
    /// IV range of a stat
    Attribute(Stat),
    /// Set of possible natures
    Trait,
    /// Level or evolution stage
    Context(ContextKey),
    /// Logical NOT
    Not(Box<Expression>),
    /// Binary operation: left op right
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// `value in set`
    Membership {
        value: Box<Expression>,
        set: Box<Expression>,
    },
}

/// Numeric context values supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKey {
    Level,
    Evolution,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// &&
    And,
    /// ||
    Or,
    /// ==
    Eq,
    /// !=
    NotEq,
    /// <
    Lt,
    /// <=
    Lte,
    /// >
    Gt,
    /// >=
    Gte,
}

impl BinaryOp {
    pub fn is_comparison(self) -> bool {
        !matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    /// The same relation with its operands swapped
    pub fn flipped(self) -> Self {
        match self {
            BinaryOp::Lt => BinaryOp::Gt,
            BinaryOp::Lte => BinaryOp::Gte,
            BinaryOp::Gt => BinaryOp::Lt,
            BinaryOp::Gte => BinaryOp::Lte,
            other => other,
        }
    }
}

impl Expression {
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: Expression) -> Self {
        Expression::Not(Box::new(operand))
    }

    pub fn membership(value: Expression, set: Expression) -> Self {
        Expression::Membership {
            value: Box::new(value),
            set: Box::new(set),
        }
    }

    pub fn number(n: f64) -> Self {
        Expression::Literal(TypedValue::Number(n))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Expression::Literal(TypedValue::Text(s.into()))
    }

    pub fn boolean(b: bool) -> Self {
        Expression::Literal(TypedValue::Boolean(b))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }
}

impl std::fmt::Display for ContextKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextKey::Level => write!(f, "level"),
            ContextKey::Evolution => write!(f, "evolution"),
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::And => write!(f, "&&"),
            BinaryOp::Or => write!(f, "||"),
            BinaryOp::Eq => write!(f, "=="),
            BinaryOp::NotEq => write!(f, "!="),
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::Lte => write!(f, "<="),
            BinaryOp::Gt => write!(f, ">"),
            BinaryOp::Gte => write!(f, ">="),
        }
    }
}
