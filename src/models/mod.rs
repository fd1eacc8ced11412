//! Domain model types for the capacitated vehicle routing problem.
//!
//! Provides the immutable problem instance, per-node display metadata,
//! the route-list solution representation with its violation types, and a
//! seeded random instance generator.

mod generate;
mod node;
mod problem;
mod solution;

pub use generate::{random_instance, GeneratedInstance, RandomInstanceSpec};
pub use node::Node;
pub(crate) use node::placeholder_name;
pub use problem::ProblemInstance;
pub use solution::{Solution, Violation, ViolationType};
