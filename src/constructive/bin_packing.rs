//! Slot-by-slot bin-packing construction.
//!
//! # Algorithm
//!
//! Visits the `max_vehicles` route slots in turn and fills each from the
//! remaining pool, scanning the pool in the given order and taking every
//! customer that still fits. Customers left over once all slots are filled
//! are appended to the last non-empty route (or a new one if none exists).
//!
//! Fed with customers in descending-demand order this is first-fit
//! decreasing, which packs tight instances better than the greedy sweep.
//!
//! # Complexity
//!
//! O(n × m) where n = number of customers, m = number of vehicles.

use crate::models::{ProblemInstance, Solution};

/// Customers sorted by descending demand, ties by index.
pub fn decreasing_demand_order(instance: &ProblemInstance) -> Vec<usize> {
    let mut order: Vec<usize> = instance.customers().collect();
    order.sort_by_key(|&c| std::cmp::Reverse(instance.demand(c)));
    order
}

/// Packs customers, taken in `order`, into at most `max_vehicles` routes.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::ProblemInstance;
/// use cvrp_anneal::constructive::{bin_packing, decreasing_demand_order};
///
/// let points = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)];
/// let dm = DistanceMatrix::from_points(&points);
/// let instance = ProblemInstance::new(dm, vec![0, 4, 6, 4, 6], 0, 10, 2);
///
/// let order = decreasing_demand_order(&instance);
/// let solution = bin_packing(&instance, &order);
/// assert_eq!(solution.routes(), &[vec![2, 1], vec![4, 3]]);
/// ```
pub fn bin_packing(instance: &ProblemInstance, order: &[usize]) -> Solution {
    let capacity = instance.vehicle_capacity();
    let mut pool = order.to_vec();
    let mut routes: Vec<Vec<usize>> = Vec::new();

    for _ in 0..instance.max_vehicles() {
        if pool.is_empty() {
            break;
        }
        let mut route = Vec::new();
        let mut load = 0;
        pool.retain(|&c| {
            let demand = instance.demand(c);
            if load + demand <= capacity {
                route.push(c);
                load += demand;
                false
            } else {
                true
            }
        });
        if !route.is_empty() {
            routes.push(route);
        }
    }

    if !pool.is_empty() {
        match routes.last_mut() {
            Some(last) => last.extend(pool),
            None => routes.push(pool),
        }
    }

    Solution::new(routes)
}
