//! Generic SA problem definition for capacitated routing.
//!
//! Implements the [`SaProblem`](u_metaheur::sa::SaProblem) trait so that an
//! instance can be driven by the generic [`SaRunner`](u_metaheur::sa::SaRunner)
//! instead of [`solve`](super::solve). The generic runner offers other
//! cooling schedules and external cancellation but no progress reports or
//! per-level history.

use rand::Rng;
use u_metaheur::sa::SaProblem;

use crate::constructive::initial_solution;
use crate::evaluation::{total_distance, FeasibilityChecker};
use crate::models::{ProblemInstance, Solution};
use crate::neighborhood::{NeighborGenerator, DEFAULT_MAX_ATTEMPTS};

/// Cost added per unit of load above capacity.
pub const OVERFLOW_PENALTY: f64 = 10_000.0;

/// SA problem for capacitated vehicle routing.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::annealing::{AnnealingConfig, RoutingSaProblem};
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::ProblemInstance;
/// use u_metaheur::sa::SaRunner;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 3, 4, 5], 0, 10, 2);
/// let problem = RoutingSaProblem::new(instance);
///
/// let config = AnnealingConfig::default()
///     .with_max_outer_iterations(20)
///     .with_inner_iterations(20)
///     .with_seed(42)
///     .to_sa_config();
/// let result = SaRunner::run(&problem, &config);
/// assert!(problem.is_valid(&result.best));
/// ```
pub struct RoutingSaProblem {
    instance: ProblemInstance,
    max_attempts: usize,
}

impl RoutingSaProblem {
    /// Creates a new routing SA problem. The instance is assumed valid.
    pub fn new(instance: ProblemInstance) -> Self {
        Self {
            instance,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the operator draws per neighbor.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// The underlying instance.
    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    /// Whether `solution` satisfies every invariant of the instance.
    pub fn is_valid(&self, solution: &Solution) -> bool {
        FeasibilityChecker::new(&self.instance).is_valid(solution)
    }
}

impl SaProblem for RoutingSaProblem {
    type Solution = Solution;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Solution {
        initial_solution(&self.instance).solution
    }

    fn cost(&self, solution: &Solution) -> f64 {
        let overflow = FeasibilityChecker::new(&self.instance).overflow(solution);
        total_distance(&self.instance, solution) + overflow as f64 * OVERFLOW_PENALTY
    }

    fn neighbor<R: Rng>(&self, solution: &Solution, rng: &mut R) -> Solution {
        NeighborGenerator::new(&self.instance)
            .with_max_attempts(self.max_attempts)
            .generate(solution, rng)
    }
}
