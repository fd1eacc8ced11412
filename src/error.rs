//! Errors reported before a search starts.
//!
//! Anything detected during the search itself (an infeasible candidate, an
//! invalid final solution) is recovered locally and never surfaces here.

use thiserror::Error;

/// Rejection of a problem instance or annealing configuration at solve entry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("instance has no customers besides the depot")]
    NoCustomers,
    #[error("distance matrix is {matrix}x{matrix} but {demands} demands were given")]
    DimensionMismatch { matrix: usize, demands: usize },
    #[error("depot index {depot} is out of range for {nodes} nodes")]
    DepotOutOfRange { depot: usize, nodes: usize },
    #[error("depot demand must be 0, got {0}")]
    DepotDemand(i32),
    #[error("vehicle capacity must be positive, got {0}")]
    NonPositiveCapacity(i32),
    #[error("at least one vehicle is required")]
    NoVehicles,
    #[error("node {node} has negative demand {demand}")]
    NegativeDemand { node: usize, demand: i32 },
    #[error("distance from {from} to {to} is invalid: {value}")]
    InvalidDistance { from: usize, to: usize, value: f64 },
    #[error("customer {customer} demand {demand} exceeds vehicle capacity {capacity}")]
    DemandExceedsCapacity {
        customer: usize,
        demand: i32,
        capacity: i32,
    },
    #[error("total demand {total_demand} exceeds the largest route load {}", i32::MAX)]
    TotalDemandTooLarge { total_demand: i64 },
    #[error("total demand {total_demand} exceeds fleet capacity {fleet_capacity}")]
    InsufficientFleet {
        total_demand: i64,
        fleet_capacity: i64,
    },
    #[error("invalid annealing parameter: {0}")]
    InvalidParameter(String),
    #[error("solver worker terminated unexpectedly")]
    WorkerPanicked,
}
