//! Customer relocation move.
//!
//! # Algorithm
//!
//! Removes one random customer from a random route and inserts it at a
//! random position of a different route, or into a fresh route of its own
//! when the fleet still has an unused vehicle. The insertion is refused if
//! the destination would exceed capacity, and so is moving the sole customer
//! of a route into a new route. A source route left empty is
//! dropped by the caller, so relocation is also how routes disappear.

use rand::Rng;

use crate::evaluation::route_load;
use crate::models::{ProblemInstance, Solution};

use super::load_fits;

/// Applies a random relocation to a copy of `solution`.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::{ProblemInstance, Solution};
/// use cvrp_anneal::neighborhood::relocate_move;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 1, 1], 0, 10, 2);
/// let solution = Solution::new(vec![vec![1, 2]]);
///
/// let mut rng = u_numflow::random::create_rng(42);
/// let neighbor = relocate_move(&instance, &solution, &mut rng).unwrap();
/// // The only destination is a new route
/// assert_eq!(neighbor.num_routes(), 2);
/// ```
pub fn relocate_move<R: Rng>(
    instance: &ProblemInstance,
    solution: &Solution,
    rng: &mut R,
) -> Option<Solution> {
    let routes = solution.routes();
    let sources: Vec<usize> = (0..routes.len()).filter(|&ri| !routes[ri].is_empty()).collect();
    if sources.is_empty() {
        return None;
    }
    let from = sources[rng.random_range(0..sources.len())];

    // Destinations: every other route, plus a new one while vehicles remain
    let can_open = routes.len() < instance.max_vehicles();
    let existing = routes.len() - 1;
    let choices = existing + usize::from(can_open);
    if choices == 0 {
        return None;
    }
    let pick = rng.random_range(0..choices);
    // A route's only customer moved into a fresh route is the same layout
    if pick == existing && routes[from].len() == 1 {
        return None;
    }

    let pos = rng.random_range(0..routes[from].len());
    let customer = routes[from][pos];

    let mut neighbor = solution.clone();
    neighbor.routes_mut()[from].remove(pos);

    if pick == existing {
        neighbor.routes_mut().push(vec![customer]);
        return Some(neighbor);
    }

    let to = if pick >= from { pick + 1 } else { pick };
    let load = route_load(instance, &routes[to]);
    if !load_fits(load + instance.demand(customer), load, instance.vehicle_capacity()) {
        return None;
    }
    let insert_at = rng.random_range(0..=routes[to].len());
    neighbor.routes_mut()[to].insert(insert_at, customer);
    Some(neighbor)
}
