//! Farthest-first greedy construction.
//!
//! # Algorithm
//!
//! Sorts customers by descending distance from the depot (stable, so ties
//! keep index order) and packs them into the current route while the load
//! fits. A customer that would overflow closes the route and opens the next
//! one, except when the current route is already the last vehicle: then the
//! remaining customers are forced into it regardless of capacity. If more
//! routes than vehicles remain, the two lightest are merged until the fleet
//! bound holds.
//!
//! Serving far customers first tends to seed each route around a distant
//! cluster that the nearer customers then fill in.
//!
//! # Complexity
//!
//! O(n log n) where n = number of customers.

use crate::evaluation::merge_lightest_routes;
use crate::models::{ProblemInstance, Solution};

/// Customers sorted by descending distance from the depot, ties by index.
pub fn farthest_first_order(instance: &ProblemInstance) -> Vec<usize> {
    let depot = instance.depot();
    let mut order: Vec<usize> = instance.customers().collect();
    order.sort_by(|&a, &b| {
        instance
            .distance(depot, b)
            .total_cmp(&instance.distance(depot, a))
    });
    order
}

/// Builds routes greedily in farthest-first order.
///
/// The result always covers every customer exactly once and never uses more
/// than `max_vehicles` routes; it can exceed capacity on the last route when
/// the fleet runs out.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::ProblemInstance;
/// use cvrp_anneal::constructive::farthest_first;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 3, 4, 5], 0, 10, 2);
///
/// let solution = farthest_first(&instance);
/// assert_eq!(solution.routes(), &[vec![3, 2], vec![1]]);
/// ```
pub fn farthest_first(instance: &ProblemInstance) -> Solution {
    let capacity = instance.vehicle_capacity();
    let max_vehicles = instance.max_vehicles();

    let mut routes: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut load = 0;

    for customer in farthest_first_order(instance) {
        let demand = instance.demand(customer);
        let last_vehicle = routes.len() + 1 >= max_vehicles;
        if load + demand > capacity && !current.is_empty() && !last_vehicle {
            routes.push(std::mem::take(&mut current));
            load = 0;
        }
        current.push(customer);
        load += demand;
    }
    if !current.is_empty() {
        routes.push(current);
    }

    merge_lightest_routes(instance, &mut routes);
    Solution::new(routes)
}
