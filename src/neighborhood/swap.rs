//! Customer swap move.
//!
//! # Algorithm
//!
//! With probability 1/2 (and if some route has at least two customers),
//! exchanges two positions inside one such route; load is unchanged.
//! Otherwise picks two different routes and one customer in each and
//! exchanges them, provided both routes stay within capacity afterwards.

use rand::Rng;

use crate::evaluation::route_load;
use crate::models::{ProblemInstance, Solution};

use super::{distinct_pair, load_fits};

/// Applies a random swap to a copy of `solution`.
///
/// Returns `None` when no swap is possible or the drawn inter-route swap
/// would break capacity.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::{ProblemInstance, Solution};
/// use cvrp_anneal::neighborhood::swap_move;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 1, 1, 1], 0, 10, 1);
/// let solution = Solution::new(vec![vec![1, 2, 3]]);
///
/// let mut rng = u_numflow::random::create_rng(42);
/// if let Some(neighbor) = swap_move(&instance, &solution, &mut rng) {
///     assert_eq!(neighbor.num_served(), 3);
/// }
/// ```
pub fn swap_move<R: Rng>(
    instance: &ProblemInstance,
    solution: &Solution,
    rng: &mut R,
) -> Option<Solution> {
    let eligible: Vec<usize> = solution
        .routes()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.len() >= 2)
        .map(|(ri, _)| ri)
        .collect();

    if rng.random_bool(0.5) && !eligible.is_empty() {
        intra_route_swap(solution, &eligible, rng)
    } else {
        inter_route_swap(instance, solution, rng)
    }
}

fn intra_route_swap<R: Rng>(
    solution: &Solution,
    eligible: &[usize],
    rng: &mut R,
) -> Option<Solution> {
    let ri = eligible[rng.random_range(0..eligible.len())];
    let (i, j) = distinct_pair(rng, solution.routes()[ri].len());

    let mut neighbor = solution.clone();
    neighbor.routes_mut()[ri].swap(i, j);
    Some(neighbor)
}

fn inter_route_swap<R: Rng>(
    instance: &ProblemInstance,
    solution: &Solution,
    rng: &mut R,
) -> Option<Solution> {
    let routes = solution.routes();
    if routes.len() < 2 {
        return None;
    }
    let (a, b) = distinct_pair(rng, routes.len());
    if routes[a].is_empty() || routes[b].is_empty() {
        return None;
    }
    let pa = rng.random_range(0..routes[a].len());
    let pb = rng.random_range(0..routes[b].len());
    let (ca, cb) = (routes[a][pa], routes[b][pb]);

    let capacity = instance.vehicle_capacity();
    let load_a = route_load(instance, &routes[a]);
    let load_b = route_load(instance, &routes[b]);
    let shift = instance.demand(cb) - instance.demand(ca);
    if !load_fits(load_a + shift, load_a, capacity)
        || !load_fits(load_b - shift, load_b, capacity)
    {
        return None;
    }

    let mut neighbor = solution.clone();
    neighbor.routes_mut()[a][pa] = cb;
    neighbor.routes_mut()[b][pb] = ca;
    Some(neighbor)
}
