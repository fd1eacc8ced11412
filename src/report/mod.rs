//! User-facing description of a solution.
//!
//! - [`describe`]: Per-route stops, loads and distances
//! - [`SolutionReport`]: Serializable report with a stable field layout

mod describe;

pub use describe::{describe, RouteReport, SolutionReport, Stop};
