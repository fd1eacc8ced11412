//! Last-resort repair of an invalid solution.
//!
//! # Algorithm
//!
//! 1. Drop every repeated occurrence of a customer (the first one found is
//!    kept), along with any depot or out-of-range index.
//! 2. Insert each missing customer, at its cheapest position, into the first
//!    route with spare capacity; otherwise into a new route if the fleet
//!    allows; otherwise into the route with the most spare capacity, even
//!    if that overflows it. A customer is never dropped.
//! 3. While there are more routes than vehicles, merge the two routes with
//!    the smallest loads.

use tracing::debug;

use crate::models::{ProblemInstance, Solution};

use super::cost::route_load;

/// Repairs coverage and route-count violations.
///
/// Capacity is respected whenever some route can take the customer; the
/// result can exceed it only when no placement fits.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::{ProblemInstance, Solution};
/// use cvrp_anneal::evaluation::{repair, FeasibilityChecker};
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 3, 4, 5], 0, 10, 2);
///
/// let broken = Solution::new(vec![vec![1, 2, 1]]);
/// let fixed = repair(&instance, &broken);
/// assert!(FeasibilityChecker::new(&instance).is_valid(&fixed));
/// ```
pub fn repair(instance: &ProblemInstance, solution: &Solution) -> Solution {
    let n = instance.num_nodes();
    let depot = instance.depot();
    let mut seen = vec![false; n];
    let mut routes: Vec<Vec<usize>> = Vec::with_capacity(solution.num_routes());

    for route in solution.routes() {
        let kept: Vec<usize> = route
            .iter()
            .copied()
            .filter(|&c| {
                if c >= n || c == depot || seen[c] {
                    debug!(customer = c, "repair dropped a visit");
                    return false;
                }
                seen[c] = true;
                true
            })
            .collect();
        if !kept.is_empty() {
            routes.push(kept);
        }
    }

    let missing: Vec<usize> = instance.customers().filter(|&c| !seen[c]).collect();
    for customer in missing {
        insert_missing(instance, &mut routes, customer);
    }

    merge_lightest_routes(instance, &mut routes);
    Solution::new(routes)
}

/// Places one missing customer according to the repair policy.
fn insert_missing(instance: &ProblemInstance, routes: &mut Vec<Vec<usize>>, customer: usize) {
    let capacity = instance.vehicle_capacity();
    let demand = instance.demand(customer);

    let fitting = routes
        .iter()
        .position(|r| route_load(instance, r) + demand <= capacity);

    let target = match fitting {
        Some(ri) => ri,
        None if routes.len() < instance.max_vehicles() => {
            routes.push(vec![customer]);
            return;
        }
        None => {
            // Every vehicle in use and none fits: overflow the roomiest route
            let roomiest = routes
                .iter()
                .enumerate()
                .max_by_key(|(ri, r)| {
                    (capacity - route_load(instance, r), std::cmp::Reverse(*ri))
                })
                .map(|(ri, _)| ri);
            match roomiest {
                Some(ri) => ri,
                None => {
                    routes.push(vec![customer]);
                    return;
                }
            }
        }
    };

    let pos = cheapest_position(instance, &routes[target], customer);
    routes[target].insert(pos, customer);
}

/// Cheapest insertion position for `customer` in `route`.
pub(crate) fn cheapest_position(
    instance: &ProblemInstance,
    route: &[usize],
    customer: usize,
) -> usize {
    let depot = instance.depot();
    let mut best = (0, f64::INFINITY);
    for pos in 0..=route.len() {
        let prev = if pos == 0 { depot } else { route[pos - 1] };
        let next = if pos == route.len() {
            depot
        } else {
            route[pos]
        };
        let cost = instance.distance(prev, customer) + instance.distance(customer, next)
            - instance.distance(prev, next);
        if cost < best.1 {
            best = (pos, cost);
        }
    }
    best.0
}

/// Merges the two lowest-load routes until at most `max_vehicles` remain.
///
/// The heavier of the pair absorbs the lighter one's customers at its tail.
pub(crate) fn merge_lightest_routes(instance: &ProblemInstance, routes: &mut Vec<Vec<usize>>) {
    while routes.len() > instance.max_vehicles() && routes.len() >= 2 {
        let mut order: Vec<usize> = (0..routes.len()).collect();
        order.sort_by_key(|&ri| route_load(instance, &routes[ri]));
        let (lightest, second) = (order[0], order[1]);

        let moved = routes.remove(lightest);
        let target = if second > lightest { second - 1 } else { second };
        routes[target].extend(moved);
    }
}
