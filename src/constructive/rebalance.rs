//! Overflow reduction for starts that exceed vehicle capacity.
//!
//! # Algorithm
//!
//! First-improvement descent on the load above capacity summed over routes.
//! Each pass walks the overloaded routes and tries, in order:
//!
//! 1. Relocating one customer into another route, or into a new route while
//!    the fleet allows.
//! 2. Swapping one customer with a customer of another route.
//! 3. Exchanging the route's tail with the tail of another route (2-opt*).
//!
//! The first move that strictly lowers the overflow is applied and the pass
//! restarts. Overflow is a non-negative integer, so the descent stops after
//! at most `overflow` applied moves.
//!
//! # Complexity
//!
//! O(V × R × n²) per solution for initial overflow V, R routes and n
//! customers per route.

use crate::evaluation::{cheapest_position, route_load};
use crate::models::{ProblemInstance, Solution};

/// Lowers the capacity overflow of a structurally sound solution.
///
/// Every customer stays served, the route count never exceeds the fleet,
/// and routes left empty are dropped. A solution already within capacity is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::constructive::reduce_overflow;
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::evaluation::FeasibilityChecker;
/// use cvrp_anneal::models::{ProblemInstance, Solution};
///
/// let points = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)];
/// let dm = DistanceMatrix::from_points(&points);
/// let instance = ProblemInstance::new(dm, vec![0, 8, 5, 2, 5], 0, 10, 2);
/// let checker = FeasibilityChecker::new(&instance);
///
/// // 5 + 8 = 13 on the second route
/// let start = Solution::new(vec![vec![4, 3], vec![2, 1]]);
/// assert_eq!(checker.overflow(&start), 3);
///
/// let reduced = reduce_overflow(&instance, &start);
/// assert!(checker.is_valid(&reduced));
/// ```
pub fn reduce_overflow(instance: &ProblemInstance, solution: &Solution) -> Solution {
    let mut routes = solution.routes().to_vec();
    while improve(instance, &mut routes) {}
    let mut reduced = Solution::new(routes);
    reduced.remove_empty_routes();
    reduced
}

fn excess(load: i64, capacity: i64) -> i64 {
    (load - capacity).max(0)
}

/// Cumulative loads of a route: entry `i` is the load of its first `i` stops.
fn prefix_loads(instance: &ProblemInstance, route: &[usize]) -> Vec<i64> {
    let mut prefix = Vec::with_capacity(route.len() + 1);
    let mut load = 0i64;
    prefix.push(load);
    for &c in route {
        load += i64::from(instance.demand(c));
        prefix.push(load);
    }
    prefix
}

/// Applies the first overflow-lowering move found; `false` at a local optimum.
fn improve(instance: &ProblemInstance, routes: &mut Vec<Vec<usize>>) -> bool {
    let capacity = i64::from(instance.vehicle_capacity());
    let loads: Vec<i64> = routes
        .iter()
        .map(|r| i64::from(route_load(instance, r)))
        .collect();
    let demand = |c: usize| i64::from(instance.demand(c));
    let lowers = |a: usize, b: usize, new_a: i64, new_b: i64| {
        excess(new_a, capacity) + excess(new_b, capacity)
            < excess(loads[a], capacity) + excess(loads[b], capacity)
    };

    for a in 0..routes.len() {
        if loads[a] <= capacity {
            continue;
        }

        // Relocate
        for pos in 0..routes[a].len() {
            let d = demand(routes[a][pos]);
            let target = (0..routes.len())
                .find(|&b| b != a && lowers(a, b, loads[a] - d, loads[b] + d));
            if let Some(b) = target {
                let customer = routes[a].remove(pos);
                let at = cheapest_position(instance, &routes[b], customer);
                routes[b].insert(at, customer);
                return true;
            }
            let opens = routes.len() < instance.max_vehicles()
                && excess(loads[a] - d, capacity) + excess(d, capacity)
                    < excess(loads[a], capacity);
            if opens {
                let customer = routes[a].remove(pos);
                routes.push(vec![customer]);
                return true;
            }
        }

        // Swap
        for pa in 0..routes[a].len() {
            let da = demand(routes[a][pa]);
            for b in (0..routes.len()).filter(|&b| b != a) {
                for pb in 0..routes[b].len() {
                    let db = demand(routes[b][pb]);
                    if lowers(a, b, loads[a] - da + db, loads[b] - db + da) {
                        let (ca, cb) = (routes[a][pa], routes[b][pb]);
                        routes[a][pa] = cb;
                        routes[b][pb] = ca;
                        return true;
                    }
                }
            }
        }

        // Tail exchange
        for b in (0..routes.len()).filter(|&b| b != a) {
            let heads_a = prefix_loads(instance, &routes[a]);
            let heads_b = prefix_loads(instance, &routes[b]);
            for (i, &head_a) in heads_a.iter().enumerate() {
                for (j, &head_b) in heads_b.iter().enumerate() {
                    let new_a = head_a + loads[b] - head_b;
                    let new_b = head_b + loads[a] - head_a;
                    if lowers(a, b, new_a, new_b) {
                        let tail_a = routes[a].split_off(i);
                        let tail_b = routes[b].split_off(j);
                        routes[a].extend(tail_b);
                        routes[b].extend(tail_a);
                        return true;
                    }
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::evaluation::FeasibilityChecker;

    fn line_instance(demands: Vec<i32>, capacity: i32, vehicles: usize) -> ProblemInstance {
        let points: Vec<(f64, f64)> = (0..demands.len()).map(|i| (i as f64, 0.0)).collect();
        ProblemInstance::new(DistanceMatrix::from_points(&points), demands, 0, capacity, vehicles)
    }

    fn served(solution: &Solution) -> Vec<usize> {
        let mut visits: Vec<usize> = solution.visits().collect();
        visits.sort_unstable();
        visits
    }

    #[test]
    fn test_within_capacity_unchanged() {
        let inst = line_instance(vec![0, 3, 4, 5], 10, 2);
        let start = Solution::new(vec![vec![1, 2], vec![3]]);
        assert_eq!(reduce_overflow(&inst, &start), start);
    }

    #[test]
    fn test_reaches_zero_through_several_moves() {
        // Two 4s far out and four 3s near the depot; only {4, 3, 3} twice fits
        let points = [
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 0.1),
            (1.0, 0.0),
            (0.0, 1.0),
            (-1.0, 0.0),
            (0.0, -1.0),
        ];
        let dm = DistanceMatrix::from_points(&points);
        let inst = ProblemInstance::new(dm, vec![0, 4, 4, 3, 3, 3, 3], 0, 10, 2);
        let checker = FeasibilityChecker::new(&inst);

        let start = Solution::new(vec![vec![2, 1], vec![3, 4, 5, 6]]);
        assert_eq!(checker.overflow(&start), 2);

        let reduced = reduce_overflow(&inst, &start);
        assert_eq!(checker.overflow(&reduced), 0);
        assert!(checker.is_valid(&reduced));
        assert_eq!(served(&reduced), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_opens_route_when_fleet_allows() {
        let inst = line_instance(vec![0, 6, 6], 10, 2);
        let reduced = reduce_overflow(&inst, &Solution::new(vec![vec![1, 2]]));
        assert_eq!(reduced.num_routes(), 2);
        assert!(FeasibilityChecker::new(&inst).is_valid(&reduced));
    }

    #[test]
    fn test_relocates_into_spare_room() {
        let inst = line_instance(vec![0, 5, 5, 5, 2, 2, 1], 10, 2);
        let checker = FeasibilityChecker::new(&inst);
        let start = Solution::new(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(checker.overflow(&start), 5);

        let reduced = reduce_overflow(&inst, &start);
        assert!(checker.is_valid(&reduced));
        assert_eq!(served(&reduced), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_tail_exchange_when_single_moves_stall() {
        // [5, 4, 2] | [2, 2, 5]: every relocate or swap leaves one route at 11
        // or more; trading tail [4, 2] for tail [5] gives 10 | 10
        let inst = line_instance(vec![0, 5, 4, 2, 2, 2, 5], 10, 2);
        let checker = FeasibilityChecker::new(&inst);
        let mut routes = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert!(improve(&inst, &mut routes));
        assert_eq!(routes, vec![vec![1, 6], vec![4, 5, 2, 3]]);
        assert!(checker.is_valid(&Solution::new(routes)));
    }

    #[test]
    fn test_stops_when_nothing_fits() {
        // 3 × 6 over two vehicles of 10 always leaves 2 above capacity
        let inst = line_instance(vec![0, 6, 6, 6], 10, 2);
        let checker = FeasibilityChecker::new(&inst);
        let reduced = reduce_overflow(&inst, &Solution::new(vec![vec![1, 2], vec![3]]));
        assert_eq!(checker.overflow(&reduced), 2);
        assert_eq!(served(&reduced), vec![1, 2, 3]);
        assert!(reduced.num_routes() <= 2);
    }
}
