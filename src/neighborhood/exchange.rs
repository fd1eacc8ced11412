//! Inter-route tail exchange (2-opt*).
//!
//! # Algorithm
//!
//! Picks two distinct routes `a` and `b` and a split point in each, then
//! swaps the tails: `a[..i] + b[j..]` and `b[..j] + a[i..]`. Distinct
//! routes share no customers, so the result has no duplicates. Rejected
//! when either new load would exceed capacity, or when the draw changes
//! nothing (both tails empty, or both splits at the head).
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *JORS* 46(12), 1433-1446.

use rand::Rng;

use crate::evaluation::route_load;
use crate::models::{ProblemInstance, Solution};

use super::{distinct_pair, load_fits};

/// Applies a random tail exchange between two routes of a copy of `solution`.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::{ProblemInstance, Solution};
/// use cvrp_anneal::neighborhood::route_exchange_move;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 1, 1, 1, 1], 0, 10, 2);
/// let solution = Solution::new(vec![vec![1, 2], vec![3, 4]]);
///
/// let mut rng = u_numflow::random::create_rng(42);
/// if let Some(neighbor) = route_exchange_move(&instance, &solution, &mut rng) {
///     assert_eq!(neighbor.num_served(), 4);
/// }
/// ```
pub fn route_exchange_move<R: Rng>(
    instance: &ProblemInstance,
    solution: &Solution,
    rng: &mut R,
) -> Option<Solution> {
    let routes = solution.routes();
    if routes.len() < 2 {
        return None;
    }
    let (a, b) = distinct_pair(rng, routes.len());
    let (route_a, route_b) = (&routes[a], &routes[b]);
    let i = rng.random_range(0..=route_a.len());
    let j = rng.random_range(0..=route_b.len());

    let tails_empty = i == route_a.len() && j == route_b.len();
    if tails_empty || (i == 0 && j == 0) {
        return None;
    }

    let capacity = instance.vehicle_capacity();
    let (load_a, load_b) = (route_load(instance, route_a), route_load(instance, route_b));
    let tail_a = route_load(instance, &route_a[i..]);
    let tail_b = route_load(instance, &route_b[j..]);
    let new_a = load_a - tail_a + tail_b;
    let new_b = load_b - tail_b + tail_a;
    if !load_fits(new_a, load_a, capacity) || !load_fits(new_b, load_b, capacity) {
        return None;
    }

    let mut next_a = route_a[..i].to_vec();
    next_a.extend_from_slice(&route_b[j..]);
    let mut next_b = route_b[..j].to_vec();
    next_b.extend_from_slice(&route_a[i..]);

    let mut neighbor = solution.clone();
    neighbor.routes_mut()[a] = next_a;
    neighbor.routes_mut()[b] = next_b;
    Some(neighbor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::test_support::{line_instance, sorted_visits};
    use u_numflow::random::create_rng;

    #[test]
    fn test_exchange_preserves_customers() {
        let inst = line_instance(vec![0, 1, 1, 1, 1, 1], 10, 3);
        let sol = Solution::new(vec![vec![1, 2], vec![3, 4], vec![5]]);
        let mut rng = create_rng(42);
        let mut produced = 0;
        for _ in 0..200 {
            if let Some(n) = route_exchange_move(&inst, &sol, &mut rng) {
                produced += 1;
                assert_eq!(sorted_visits(&n), vec![1, 2, 3, 4, 5]);
                assert_eq!(n.num_routes(), 3);
                assert_ne!(n, sol);
            }
        }
        assert!(produced > 0);
    }

    #[test]
    fn test_exchange_respects_capacity() {
        // Any non-trivial tail swap moves a 4 next to a 4
        let inst = line_instance(vec![0, 4, 4], 5, 2);
        let sol = Solution::new(vec![vec![1], vec![2]]);
        let mut rng = create_rng(42);
        for _ in 0..100 {
            if let Some(n) = route_exchange_move(&inst, &sol, &mut rng) {
                for route in n.routes() {
                    assert!(route_load(&inst, route) <= 5);
                }
            }
        }
    }

    #[test]
    fn test_exchange_single_route() {
        let inst = line_instance(vec![0, 1, 1], 10, 2);
        let sol = Solution::new(vec![vec![1, 2]]);
        let mut rng = create_rng(42);
        assert!(route_exchange_move(&inst, &sol, &mut rng).is_none());
    }
}
