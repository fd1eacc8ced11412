//! Solution feasibility checking.

use crate::models::{ProblemInstance, Solution, Violation, ViolationType};

use super::cost::route_load;

/// Checks a solution against the CVRP invariants of an instance.
///
/// Checks run in a fixed order: empty solution, duplicate customers,
/// coverage (missing and unexpected nodes), per-route capacity, then the
/// structural rules on route count and empty routes. Violations are
/// diagnostics only; callers decide whether to discard or repair.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::{ProblemInstance, Solution};
/// use cvrp_anneal::evaluation::FeasibilityChecker;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 3, 4, 5], 0, 10, 2);
/// let checker = FeasibilityChecker::new(&instance);
///
/// assert!(checker.is_valid(&Solution::new(vec![vec![1, 2], vec![3]])));
/// // 3 + 4 + 5 = 12 > 10
/// assert!(!checker.is_valid(&Solution::new(vec![vec![1, 2, 3]])));
/// ```
pub struct FeasibilityChecker<'a> {
    instance: &'a ProblemInstance,
}

impl<'a> FeasibilityChecker<'a> {
    /// Creates a checker for the given instance.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self { instance }
    }

    /// Returns `true` if the solution satisfies every invariant.
    pub fn is_valid(&self, solution: &Solution) -> bool {
        self.violations(solution).is_empty()
    }

    /// Returns `Ok(())` or the first violation found.
    pub fn validate(&self, solution: &Solution) -> Result<(), Violation> {
        match self.violations(solution).into_iter().next() {
            Some(v) => Err(v),
            None => Ok(()),
        }
    }

    /// Collects every violation, in check order.
    pub fn violations(&self, solution: &Solution) -> Vec<Violation> {
        if solution.is_empty() {
            return vec![Violation::new(ViolationType::EmptySolution)];
        }
        let mut violations = self.structural_violations(solution);
        violations.extend(self.capacity_violations(solution));
        violations.sort_by_key(|v| check_order(&v.kind));
        violations
    }

    /// Coverage, duplication, route-count, and empty-route violations;
    /// everything except capacity.
    pub fn structural_violations(&self, solution: &Solution) -> Vec<Violation> {
        let n = self.instance.num_nodes();
        let depot = self.instance.depot();
        let mut violations = Vec::new();

        let mut counts = vec![0usize; n];
        let mut unexpected = Vec::new();
        for c in solution.visits() {
            if c >= n || c == depot {
                unexpected.push(c);
            } else {
                counts[c] += 1;
            }
        }

        for (customer, &occurrences) in counts.iter().enumerate() {
            if occurrences > 1 {
                violations.push(Violation::new(ViolationType::DuplicateCustomer {
                    customer,
                    occurrences,
                }));
            }
        }

        let missing: Vec<usize> = self
            .instance
            .customers()
            .filter(|&c| counts[c] == 0)
            .collect();
        if !missing.is_empty() {
            violations.push(Violation::new(ViolationType::MissingCustomers(missing)));
        }
        if !unexpected.is_empty() {
            unexpected.sort_unstable();
            unexpected.dedup();
            violations.push(Violation::new(ViolationType::UnexpectedCustomers(
                unexpected,
            )));
        }

        if solution.num_routes() > self.instance.max_vehicles() {
            violations.push(Violation::new(ViolationType::TooManyRoutes {
                routes: solution.num_routes(),
                max_vehicles: self.instance.max_vehicles(),
            }));
        }
        for (route_index, route) in solution.routes().iter().enumerate() {
            if route.is_empty() {
                violations.push(Violation::new(ViolationType::EmptyRoute { route_index }));
            }
        }

        violations
    }

    /// One violation per route whose load exceeds the vehicle capacity.
    pub fn capacity_violations(&self, solution: &Solution) -> Vec<Violation> {
        let capacity = self.instance.vehicle_capacity();
        solution
            .routes()
            .iter()
            .enumerate()
            .filter_map(|(route_index, route)| {
                let load = route_load(self.instance, route);
                (load > capacity).then(|| {
                    Violation::new(ViolationType::CapacityExceeded {
                        route_index,
                        load,
                        capacity,
                    })
                })
            })
            .collect()
    }

    /// Sum of load above capacity over all routes; zero when capacity holds.
    pub fn overflow(&self, solution: &Solution) -> i64 {
        let capacity = self.instance.vehicle_capacity() as i64;
        solution
            .routes()
            .iter()
            .map(|r| (route_load(self.instance, r) as i64 - capacity).max(0))
            .sum()
    }

    /// Whether `candidate` may replace `current` during search.
    ///
    /// A fully valid candidate is always admitted. When `current` itself
    /// carries capacity overflow (a forced initial layout), a candidate that
    /// is structurally sound and does not increase the overflow is admitted
    /// too, so the search can work the overflow down.
    pub fn admits(&self, candidate: &Solution, current: &Solution) -> bool {
        if candidate.is_empty() || !self.structural_violations(candidate).is_empty() {
            return false;
        }
        let overflow = self.overflow(candidate);
        overflow == 0 || overflow <= self.overflow(current)
    }
}

/// Position of a violation kind in the documented check order.
fn check_order(kind: &ViolationType) -> u8 {
    match kind {
        ViolationType::EmptySolution => 0,
        ViolationType::DuplicateCustomer { .. } => 1,
        ViolationType::MissingCustomers(_) => 2,
        ViolationType::UnexpectedCustomers(_) => 3,
        ViolationType::CapacityExceeded { .. } => 4,
        ViolationType::TooManyRoutes { .. } => 5,
        ViolationType::EmptyRoute { .. } => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    fn scenario() -> ProblemInstance {
        let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        ProblemInstance::new(dm, vec![0, 3, 4, 5], 0, 10, 2)
    }

    #[test]
    fn test_valid_two_routes() {
        let inst = scenario();
        let checker = FeasibilityChecker::new(&inst);
        let sol = Solution::new(vec![vec![3, 1], vec![2]]);
        assert!(checker.is_valid(&sol));
        assert_eq!(checker.validate(&sol), Ok(()));
        assert_eq!(checker.overflow(&sol), 0);
    }

    #[test]
    fn test_empty_solution() {
        let inst = scenario();
        let checker = FeasibilityChecker::new(&inst);
        let violations = checker.violations(&Solution::default());
        assert_eq!(violations, vec![Violation::new(ViolationType::EmptySolution)]);
    }

    #[test]
    fn test_single_overloaded_route() {
        let inst = scenario();
        let checker = FeasibilityChecker::new(&inst);
        let sol = Solution::new(vec![vec![1, 2, 3]]);
        assert_eq!(
            checker.validate(&sol),
            Err(Violation::new(ViolationType::CapacityExceeded {
                route_index: 0,
                load: 12,
                capacity: 10
            }))
        );
        assert_eq!(checker.overflow(&sol), 2);
    }

    #[test]
    fn test_duplicate_reported_before_missing() {
        let inst = scenario();
        let checker = FeasibilityChecker::new(&inst);
        let sol = Solution::new(vec![vec![1, 2], vec![1]]);
        let violations = checker.violations(&sol);
        assert_eq!(
            violations[0].kind,
            ViolationType::DuplicateCustomer {
                customer: 1,
                occurrences: 2
            }
        );
        assert_eq!(violations[1].kind, ViolationType::MissingCustomers(vec![3]));
    }

    #[test]
    fn test_depot_and_out_of_range_are_unexpected() {
        let inst = scenario();
        let checker = FeasibilityChecker::new(&inst);
        let sol = Solution::new(vec![vec![0, 1, 2], vec![3, 9]]);
        let violations = checker.violations(&sol);
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationType::UnexpectedCustomers(vec![0, 9])));
    }

    #[test]
    fn test_too_many_routes_and_empty_route() {
        let inst = scenario();
        let checker = FeasibilityChecker::new(&inst);
        let sol = Solution::new(vec![vec![1], vec![2], vec![3], vec![]]);
        let kinds: Vec<ViolationType> = checker
            .violations(&sol)
            .into_iter()
            .map(|v| v.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ViolationType::TooManyRoutes {
                    routes: 4,
                    max_vehicles: 2
                },
                ViolationType::EmptyRoute { route_index: 3 },
            ]
        );
    }

    #[test]
    fn test_admits_valid_candidate() {
        let inst = scenario();
        let checker = FeasibilityChecker::new(&inst);
        let current = Solution::new(vec![vec![1, 2], vec![3]]);
        let candidate = Solution::new(vec![vec![2, 1], vec![3]]);
        assert!(checker.admits(&candidate, &current));
        let overloaded = Solution::new(vec![vec![1, 2, 3]]);
        assert!(!checker.admits(&overloaded, &current));
    }

    #[test]
    fn test_admits_overflow_reduction_only() {
        let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let inst = ProblemInstance::new(dm, vec![0, 6, 6, 6], 0, 10, 2);
        let checker = FeasibilityChecker::new(&inst);
        // Forced layout: 12 on one route, 6 on the other
        let current = Solution::new(vec![vec![1, 2], vec![3]]);
        assert_eq!(checker.overflow(&current), 2);
        assert!(checker.admits(&Solution::new(vec![vec![2, 1], vec![3]]), &current));
        assert!(!checker.admits(&Solution::new(vec![vec![1, 2, 3]]), &current));
        assert!(!checker.admits(&Solution::new(vec![vec![1, 2]]), &current));
    }
}
