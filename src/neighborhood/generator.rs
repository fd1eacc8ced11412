//! Uniform random move selection with bounded retries.

use rand::Rng;
use tracing::trace;

use crate::evaluation::FeasibilityChecker;
use crate::models::{ProblemInstance, Solution};

use super::{relocate_move, route_exchange_move, swap_move, two_opt_move};

/// Attempts per call before giving up and returning the current solution.
pub const DEFAULT_MAX_ATTEMPTS: usize = 20;

/// The neighborhood operators available to the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Exchange two customers.
    Swap,
    /// Move one customer to another route.
    Relocate,
    /// Reverse a segment inside a route.
    TwoOpt,
    /// Swap the tails of two routes.
    RouteExchange,
}

impl MoveKind {
    /// Every operator, in selection order.
    pub const ALL: [MoveKind; 4] = [
        MoveKind::Swap,
        MoveKind::Relocate,
        MoveKind::TwoOpt,
        MoveKind::RouteExchange,
    ];

    /// Applies this operator to a copy of `solution`.
    pub fn apply<R: Rng>(
        self,
        instance: &ProblemInstance,
        solution: &Solution,
        rng: &mut R,
    ) -> Option<Solution> {
        match self {
            MoveKind::Swap => swap_move(instance, solution, rng),
            MoveKind::Relocate => relocate_move(instance, solution, rng),
            MoveKind::TwoOpt => two_opt_move(instance, solution, rng),
            MoveKind::RouteExchange => route_exchange_move(instance, solution, rng),
        }
    }
}

/// Produces neighbors of a solution by drawing a uniformly random operator.
///
/// Each attempt applies one operator, drops routes left empty, and checks
/// the result with [`FeasibilityChecker::admits`]. After `max_attempts`
/// failed attempts the current solution is returned as is, so the output is
/// never less feasible than the input.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::{ProblemInstance, Solution};
/// use cvrp_anneal::evaluation::FeasibilityChecker;
/// use cvrp_anneal::neighborhood::NeighborGenerator;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 3, 4, 5], 0, 10, 2);
/// let current = Solution::new(vec![vec![1, 2], vec![3]]);
///
/// let generator = NeighborGenerator::new(&instance);
/// let mut rng = u_numflow::random::create_rng(42);
/// let neighbor = generator.generate(&current, &mut rng);
/// assert!(FeasibilityChecker::new(&instance).is_valid(&neighbor));
/// ```
pub struct NeighborGenerator<'a> {
    instance: &'a ProblemInstance,
    checker: FeasibilityChecker<'a>,
    max_attempts: usize,
}

impl<'a> NeighborGenerator<'a> {
    /// Creates a generator with [`DEFAULT_MAX_ATTEMPTS`].
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            instance,
            checker: FeasibilityChecker::new(instance),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the number of attempts per call (at least one).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Returns a neighbor of `current`, or a clone of it when every
    /// attempt failed.
    pub fn generate<R: Rng>(&self, current: &Solution, rng: &mut R) -> Solution {
        match self.try_generate(current, rng) {
            Some((neighbor, _)) => neighbor,
            None => current.clone(),
        }
    }

    /// Like [`generate`](Self::generate) but reports which operator produced
    /// the neighbor, and `None` instead of falling back.
    pub fn try_generate<R: Rng>(
        &self,
        current: &Solution,
        rng: &mut R,
    ) -> Option<(Solution, MoveKind)> {
        for _ in 0..self.max_attempts {
            let kind = MoveKind::ALL[rng.random_range(0..MoveKind::ALL.len())];
            let Some(mut candidate) = kind.apply(self.instance, current, rng) else {
                continue;
            };
            candidate.remove_empty_routes();
            if self.checker.admits(&candidate, current) {
                return Some((candidate, kind));
            }
            trace!(?kind, "discarding inadmissible neighbor");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::test_support::{line_instance, sorted_visits};
    use u_numflow::random::create_rng;

    #[test]
    fn test_generate_stays_valid() {
        let inst = line_instance(vec![0, 2, 3, 4, 2, 3, 1], 8, 3);
        let generator = NeighborGenerator::new(&inst);
        let checker = FeasibilityChecker::new(&inst);
        let mut rng = create_rng(42);
        let mut current = Solution::new(vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
        assert!(checker.is_valid(&current));
        for _ in 0..500 {
            current = generator.generate(&current, &mut rng);
            assert!(checker.is_valid(&current), "invalid neighbor {current:?}");
        }
    }

    #[test]
    fn test_generate_no_move_returns_current() {
        // One customer, one vehicle: no operator applies
        let inst = line_instance(vec![0, 1], 10, 1);
        let generator = NeighborGenerator::new(&inst);
        let mut rng = create_rng(42);
        let current = Solution::new(vec![vec![1]]);
        assert_eq!(generator.try_generate(&current, &mut rng), None);
        assert_eq!(generator.generate(&current, &mut rng), current);
    }

    #[test]
    fn test_generate_does_not_mutate_input() {
        let inst = line_instance(vec![0, 1, 1, 1, 1], 10, 2);
        let generator = NeighborGenerator::new(&inst);
        let mut rng = create_rng(42);
        let current = Solution::new(vec![vec![1, 2, 3, 4]]);
        let snapshot = current.clone();
        for _ in 0..50 {
            let _ = generator.generate(&current, &mut rng);
        }
        assert_eq!(current, snapshot);
    }

    #[test]
    fn test_every_operator_gets_used() {
        let inst = line_instance(vec![0, 1, 1, 1, 1, 1, 1], 10, 3);
        let generator = NeighborGenerator::new(&inst);
        let mut rng = create_rng(42);
        let current = Solution::new(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..400 {
            if let Some((n, kind)) = generator.try_generate(&current, &mut rng) {
                assert_eq!(sorted_visits(&n), vec![1, 2, 3, 4, 5, 6]);
                seen.insert(kind);
            }
        }
        assert_eq!(seen.len(), MoveKind::ALL.len());
    }

    #[test]
    fn test_never_increases_overflow() {
        // Forced start: 12 on a capacity-10 route
        let inst = line_instance(vec![0, 6, 6, 6], 10, 2);
        let generator = NeighborGenerator::new(&inst);
        let checker = FeasibilityChecker::new(&inst);
        let mut rng = create_rng(42);
        let mut current = Solution::new(vec![vec![1, 2], vec![3]]);
        let mut overflow = checker.overflow(&current);
        for _ in 0..200 {
            current = generator.generate(&current, &mut rng);
            let next = checker.overflow(&current);
            assert!(next <= overflow);
            overflow = next;
        }
    }
}
