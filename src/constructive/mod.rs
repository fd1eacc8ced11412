//! Constructive heuristics for seeding the search.
//!
//! - [`farthest_first`]: Greedy packing in descending depot distance, O(n log n)
//! - [`bin_packing`]: Slot-by-slot first-fit packing, O(n × m)
//! - [`reduce_overflow`]: Relocate, swap and tail-exchange descent on overflow
//! - [`initial_solution`]: Greedy construction with bin-packing fallback

mod bin_packing;
mod farthest_first;
mod rebalance;

pub use bin_packing::{bin_packing, decreasing_demand_order};
pub use farthest_first::{farthest_first, farthest_first_order};
pub use rebalance::reduce_overflow;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::evaluation::{total_distance, FeasibilityChecker};
use crate::models::{ProblemInstance, Solution};

/// Heuristic that produced an initial solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructionMethod {
    /// Farthest-first greedy packing.
    FarthestFirst,
    /// Bin packing over the farthest-first order.
    BinPacking,
    /// Bin packing over descending demands (first-fit decreasing).
    FirstFitDecreasing,
}

/// An initial solution and how it was obtained.
#[derive(Debug, Clone)]
pub struct Construction {
    /// The constructed solution.
    pub solution: Solution,
    /// Heuristic that produced it.
    pub method: ConstructionMethod,
    /// Load above capacity summed over routes; zero for a valid start.
    pub overflow: i64,
}

/// Builds the initial solution for a search.
///
/// Runs [`farthest_first`] and verifies it. When the greedy layout is not
/// valid, the bin-packing fallbacks are tried as well and the candidate that
/// is structurally sound with the least capacity overflow wins, shorter
/// total distance breaking ties. A winner still over capacity goes through
/// [`reduce_overflow`] before it is returned.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::ProblemInstance;
/// use cvrp_anneal::constructive::{initial_solution, ConstructionMethod};
///
/// // Greedy forces 5 + 8 onto the last vehicle; first-fit decreasing
/// // finds {8, 2} and {5, 5}
/// let points = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)];
/// let dm = DistanceMatrix::from_points(&points);
/// let instance = ProblemInstance::new(dm, vec![0, 8, 5, 2, 5], 0, 10, 2);
///
/// let construction = initial_solution(&instance);
/// assert_eq!(construction.overflow, 0);
/// assert_eq!(construction.method, ConstructionMethod::FirstFitDecreasing);
/// ```
pub fn initial_solution(instance: &ProblemInstance) -> Construction {
    let checker = FeasibilityChecker::new(instance);
    let greedy = farthest_first(instance);

    let reason = match checker.validate(&greedy) {
        Ok(()) => {
            debug!(routes = greedy.num_routes(), "farthest-first construction is valid");
            return Construction {
                solution: greedy,
                method: ConstructionMethod::FarthestFirst,
                overflow: 0,
            };
        }
        Err(violation) => violation,
    };
    warn!(%reason, "farthest-first construction invalid, trying bin packing");

    let score = |solution: Solution, method: ConstructionMethod| {
        let broken = !checker.structural_violations(&solution).is_empty();
        let overflow = checker.overflow(&solution);
        let cost = total_distance(instance, &solution);
        (broken, overflow, cost, solution, method)
    };

    let mut best = score(greedy, ConstructionMethod::FarthestFirst);
    let fallbacks = [
        (
            bin_packing(instance, &farthest_first_order(instance)),
            ConstructionMethod::BinPacking,
        ),
        (
            bin_packing(instance, &decreasing_demand_order(instance)),
            ConstructionMethod::FirstFitDecreasing,
        ),
    ];
    for (solution, method) in fallbacks {
        let candidate = score(solution, method);
        let better = (candidate.0, candidate.1)
            .cmp(&(best.0, best.1))
            .then(candidate.2.total_cmp(&best.2))
            .is_lt();
        if better {
            best = candidate;
        }
    }
    let (broken, mut overflow, _, mut solution, method) = best;

    if overflow > 0 && !broken {
        let before = overflow;
        solution = reduce_overflow(instance, &solution);
        overflow = checker.overflow(&solution);
        debug!(before, after = overflow, "reduced construction overflow");
    }

    if overflow > 0 {
        warn!(
            overflow,
            ?method,
            "no capacity-feasible start found, search begins over capacity"
        );
    } else {
        debug!(?method, "fallback construction is valid");
    }

    Construction {
        solution,
        method,
        overflow,
    }
}
