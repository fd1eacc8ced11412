//! Simulated annealing search for the CVRP.
//!
//! - [`solve`]: Validated entry point: construction, annealing loop, final repair
//! - [`AnnealingConfig`]: Temperatures, cooling rate and iteration budgets
//! - [`ProgressObserver`]: Synchronous progress callback
//! - [`SolveJob`]: Runs [`solve`] on a worker thread with pollable status
//! - [`RoutingSaProblem`]: [`SaProblem`](u_metaheur::sa::SaProblem) implementation
//!
//! # Reference
//!
//! Kirkpatrick, S., Gelatt, C. D. & Vecchi, M. P. (1983). "Optimization by
//! Simulated Annealing", *Science* 220(4598), 671-680.

mod bridge;
mod config;
mod job;
mod runner;
mod types;

pub use bridge::{RoutingSaProblem, OVERFLOW_PENALTY};
pub use config::AnnealingConfig;
pub use job::{JobOutcome, JobStatus, SolveJob};
pub use runner::solve;
pub use types::{AnnealingResult, HistoryPoint, Progress, ProgressObserver, RunState};
