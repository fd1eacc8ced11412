//! # cvrp-anneal
//!
//! Capacitated vehicle routing by simulated annealing: greedy construction,
//! randomized neighborhood moves, feasibility checking and repair, progress
//! reporting, and a display report of the result.
//!
//! ## Modules
//!
//! - [`models`]: Problem instance, node metadata, solution and violation types
//! - [`distance`]: Dense distance matrix
//! - [`evaluation`]: Route cost and load, feasibility checking, repair
//! - [`constructive`]: Farthest-first greedy with bin-packing fallbacks
//! - [`neighborhood`]: Swap, relocate, 2-opt and route-exchange moves
//! - [`annealing`]: The annealing loop, its configuration and a background job
//! - [`report`]: Per-route stops, loads and distances for display
//! - [`error`]: Errors reported at solve entry
//!
//! ## Example
//!
//! ```
//! use cvrp_anneal::annealing::{solve, AnnealingConfig};
//! use cvrp_anneal::models::{random_instance, RandomInstanceSpec};
//! use cvrp_anneal::report::describe;
//!
//! let generated = random_instance(&RandomInstanceSpec::default()).unwrap();
//! let config = AnnealingConfig::default()
//!     .with_max_outer_iterations(100)
//!     .with_seed(42);
//!
//! let result = solve(&generated.instance, &config, ()).unwrap();
//! let names = generated.names();
//! let report = describe(&generated.instance, &result.solution, result.best_cost, Some(names.as_slice()));
//! assert!(result.is_valid());
//! assert_eq!(report.routes.len(), result.routes().len());
//! ```

pub mod annealing;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod neighborhood;
pub mod report;

pub use error::SolveError;
