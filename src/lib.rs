// SPDX-License-Identifier: MIT

//! Conditional route content driven by IV and nature inference
//!
//! * [`condition`] parses, evaluates and formats conditions such as
//!   `level >= 16 && HP > 20`.
//! * [`tracker`] narrows the IVs and nature of a tracked entity from its
//!   recorded stats.
//! * [`route`] ties both together for conditional blocks in a route.
//!
//! ```
//! use route_logic::condition::{evaluate_condition, parse, Environment};
//! use route_logic::tracker::{IvRange, IvRanges, Stat};
//!
//! let expr = parse("level >= 16 && HP > 20").unwrap();
//! let ranges = IvRanges::full().with(Stat::Hp, IvRange::new(18, 25).unwrap());
//! let env = Environment::new(16.0, 0.0).with_ranges(ranges);
//! assert_eq!(evaluate_condition(&expr, &env), Ok(false));
//! ```

pub mod condition;
pub mod error;
pub mod route;
pub mod tracker;

pub use error::RouteError;
