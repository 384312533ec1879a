// SPDX-License-Identifier: MIT

//! Conditional expressions for route content
//!
//! This module provides parsing, evaluation and canonical formatting of the
//! conditions attached to route sections. Conditions look like:
//! - `level >= 16 && HP > 20`
//! - `trait == "Bold"` or `"Bold" in trait`
//! - `badges >= 3 || !rival_beaten`

mod ast;
mod environment;
mod evaluator;
mod format;
mod lexer;
mod parser;
mod value;

pub use ast::{BinaryOp, ContextKey, Expression};
pub use environment::Environment;
pub use evaluator::{evaluate, evaluate_condition};
pub use format::format_condition;
pub use parser::{parse, MAX_DEPTH};
pub use value::{cast, TypedValue, VariableKind};
