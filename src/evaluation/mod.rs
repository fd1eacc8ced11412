//! Cost evaluation, feasibility checking, and repair.
//!
//! - [`route_distance`], [`total_distance`], [`route_load`]: objective and load
//! - [`FeasibilityChecker`]: coverage, duplication, capacity, and fleet invariants
//! - [`repair`]: last-resort fix-up of an invalid solution

mod cost;
mod feasibility;
mod repair;

pub use cost::{route_distance, route_load, total_distance};
pub use feasibility::FeasibilityChecker;
pub(crate) use repair::{cheapest_position, merge_lightest_routes};
pub use repair::repair;
