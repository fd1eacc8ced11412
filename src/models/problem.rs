//! Problem instance.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::SolveError;

/// An immutable CVRP instance: distances, demands, depot, and a homogeneous
/// fleet of `max_vehicles` vehicles with `vehicle_capacity` each.
///
/// Construction does not validate; [`ProblemInstance::validate`] is run at
/// solve entry so that malformed input is rejected before any search.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::ProblemInstance;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 4, 5], 0, 10, 2);
/// assert!(instance.validate().is_ok());
/// assert_eq!(instance.customers().collect::<Vec<_>>(), vec![1, 2]);
/// assert_eq!(instance.total_demand(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemInstance {
    distances: DistanceMatrix,
    demands: Vec<i32>,
    depot: usize,
    vehicle_capacity: i32,
    max_vehicles: usize,
}

impl ProblemInstance {
    /// Creates a new instance.
    pub fn new(
        distances: DistanceMatrix,
        demands: Vec<i32>,
        depot: usize,
        vehicle_capacity: i32,
        max_vehicles: usize,
    ) -> Self {
        Self {
            distances,
            demands,
            depot,
            vehicle_capacity,
            max_vehicles,
        }
    }

    /// Checks the input contract, returning the first violation found.
    ///
    /// Besides shape checks this rejects instances that are infeasible by
    /// construction: a single customer heavier than a vehicle, or a total
    /// demand beyond what the whole fleet can carry.
    pub fn validate(&self) -> Result<(), SolveError> {
        let n = self.distances.size();
        if self.demands.len() != n {
            return Err(SolveError::DimensionMismatch {
                matrix: n,
                demands: self.demands.len(),
            });
        }
        if self.depot >= n {
            return Err(SolveError::DepotOutOfRange {
                depot: self.depot,
                nodes: n,
            });
        }
        if n < 2 {
            return Err(SolveError::NoCustomers);
        }
        if let Some((from, to, value)) = self.distances.first_invalid_entry() {
            return Err(SolveError::InvalidDistance { from, to, value });
        }
        if let Some((node, &demand)) = self
            .demands
            .iter()
            .enumerate()
            .find(|&(_, &d)| d < 0)
        {
            return Err(SolveError::NegativeDemand { node, demand });
        }
        if self.demands[self.depot] != 0 {
            return Err(SolveError::DepotDemand(self.demands[self.depot]));
        }
        if self.vehicle_capacity <= 0 {
            return Err(SolveError::NonPositiveCapacity(self.vehicle_capacity));
        }
        if self.max_vehicles == 0 {
            return Err(SolveError::NoVehicles);
        }
        if let Some(customer) = self
            .customers()
            .find(|&c| self.demands[c] > self.vehicle_capacity)
        {
            return Err(SolveError::DemandExceedsCapacity {
                customer,
                demand: self.demands[customer],
                capacity: self.vehicle_capacity,
            });
        }
        // Route loads are summed in i32; bounding the total bounds every route
        let total_demand = self.total_demand();
        if total_demand > i64::from(i32::MAX) {
            return Err(SolveError::TotalDemandTooLarge { total_demand });
        }
        let fleet_capacity =
            i64::from(self.vehicle_capacity).saturating_mul(self.max_vehicles as i64);
        if total_demand > fleet_capacity {
            return Err(SolveError::InsufficientFleet {
                total_demand,
                fleet_capacity,
            });
        }
        Ok(())
    }

    /// The distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Travel cost from node `from` to node `to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Per-node demands (the depot's is 0).
    pub fn demands(&self) -> &[i32] {
        &self.demands
    }

    /// Demand of a single node.
    pub fn demand(&self, node: usize) -> i32 {
        self.demands[node]
    }

    /// Depot node index.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Capacity of every vehicle.
    pub fn vehicle_capacity(&self) -> i32 {
        self.vehicle_capacity
    }

    /// Upper bound on the number of routes.
    pub fn max_vehicles(&self) -> usize {
        self.max_vehicles
    }

    /// Number of nodes including the depot.
    pub fn num_nodes(&self) -> usize {
        self.distances.size()
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.num_nodes().saturating_sub(1)
    }

    /// All customer indices in ascending order.
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_nodes()).filter(move |&i| i != self.depot)
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> i64 {
        self.customers().map(|c| self.demands[c] as i64).sum()
    }
}
