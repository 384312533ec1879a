// SPDX-License-Identifier: MIT

//! Route state and conditional blocks
//!
//! This module provides:
//! - `RouteState` - declared variables and trackers, usually loaded from YAML
//! - `RouteLoader` - reads route state files
//! - `resolve_block` - decides whether a conditional block is shown

mod block;
mod loader;
mod state;

pub use block::{parse_context_number, resolve_block, BlockOutcome, BlockProps};
pub use loader::RouteLoader;
pub use state::{RouteState, VariableDecl};
