//! Route and solution cost.

use crate::models::{ProblemInstance, Solution};

/// Distance of a single route, depot → customers → depot.
///
/// An empty route costs nothing.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::ProblemInstance;
/// use cvrp_anneal::evaluation::route_distance;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 1, 1, 1], 0, 10, 1);
/// // 0→1→2→3→0 = 1 + 1 + 1 + 3
/// assert!((route_distance(&instance, &[1, 2, 3]) - 6.0).abs() < 1e-10);
/// ```
pub fn route_distance(instance: &ProblemInstance, route: &[usize]) -> f64 {
    let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
        return 0.0;
    };
    let depot = instance.depot();
    let inner: f64 = route
        .windows(2)
        .map(|w| instance.distance(w[0], w[1]))
        .sum();
    instance.distance(depot, first) + inner + instance.distance(last, depot)
}

/// Total distance across all routes.
pub fn total_distance(instance: &ProblemInstance, solution: &Solution) -> f64 {
    solution
        .routes()
        .iter()
        .map(|r| route_distance(instance, r))
        .sum()
}

/// Total demand served by a route.
pub fn route_load(instance: &ProblemInstance, route: &[usize]) -> i32 {
    route.iter().map(|&c| instance.demand(c)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    fn line_instance() -> ProblemInstance {
        let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        ProblemInstance::new(dm, vec![0, 2, 3, 4], 0, 10, 2)
    }

    #[test]
    fn test_empty_route() {
        assert_eq!(route_distance(&line_instance(), &[]), 0.0);
        assert_eq!(route_load(&line_instance(), &[]), 0);
    }

    #[test]
    fn test_single_customer_round_trip() {
        let inst = line_instance();
        assert!((route_distance(&inst, &[3]) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_total_distance_two_routes() {
        let inst = line_instance();
        let sol = Solution::new(vec![vec![1], vec![2, 3]]);
        // (0→1→0) + (0→2→3→0) = 2 + 6
        assert!((total_distance(&inst, &sol) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_route_load() {
        assert_eq!(route_load(&line_instance(), &[1, 3]), 6);
    }

    #[test]
    fn test_depot_elsewhere() {
        let dm = DistanceMatrix::from_points(&[(1.0, 0.0), (0.0, 0.0), (3.0, 0.0)]);
        let inst = ProblemInstance::new(dm, vec![1, 0, 1], 1, 10, 1);
        // 1→0→2→1 = 1 + 2 + 3
        assert!((route_distance(&inst, &[0, 2]) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_asymmetric_direction_matters() {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 1.0, 10.0],
            vec![10.0, 0.0, 1.0],
            vec![1.0, 10.0, 0.0],
        ])
        .expect("square");
        let inst = ProblemInstance::new(dm, vec![0, 1, 1], 0, 10, 1);
        assert!((route_distance(&inst, &[1, 2]) - 3.0).abs() < 1e-10);
        assert!((route_distance(&inst, &[2, 1]) - 30.0).abs() < 1e-10);
    }
}
