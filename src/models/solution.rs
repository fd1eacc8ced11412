//! Solution and violation types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A type of invariant violation found in a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// The solution has no routes at all.
    EmptySolution,
    /// A route with no customers.
    EmptyRoute {
        /// Route index in the solution.
        route_index: usize,
    },
    /// A customer visited more than once.
    DuplicateCustomer {
        /// Customer index.
        customer: usize,
        /// Number of times it appears.
        occurrences: usize,
    },
    /// Customers that no route visits.
    MissingCustomers(Vec<usize>),
    /// Visited indices that are not customers (the depot or out of range).
    UnexpectedCustomers(Vec<usize>),
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// More routes than vehicles.
    TooManyRoutes {
        /// Routes in the solution.
        routes: usize,
        /// Vehicles available.
        max_vehicles: usize,
    },
}

/// An invariant violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationType::EmptySolution => write!(f, "solution has no routes"),
            ViolationType::EmptyRoute { route_index } => {
                write!(f, "route {route_index} is empty")
            }
            ViolationType::DuplicateCustomer {
                customer,
                occurrences,
            } => write!(f, "customer {customer} is visited {occurrences} times"),
            ViolationType::MissingCustomers(missing) => {
                write!(f, "customers not visited: {missing:?}")
            }
            ViolationType::UnexpectedCustomers(extra) => {
                write!(f, "unexpected nodes visited: {extra:?}")
            }
            ViolationType::CapacityExceeded {
                route_index,
                load,
                capacity,
            } => write!(f, "route {route_index} load {load} exceeds capacity {capacity}"),
            ViolationType::TooManyRoutes {
                routes,
                max_vehicles,
            } => write!(f, "{routes} routes but only {max_vehicles} vehicles"),
        }
    }
}

/// A CVRP solution: an ordered list of routes, each an ordered sequence of
/// customer indices. The depot is implicit at both ends of every route.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::models::Solution;
///
/// let mut sol = Solution::new(vec![vec![1, 2], vec![], vec![3]]);
/// sol.remove_empty_routes();
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Solution {
    routes: Vec<Vec<usize>>,
}

impl Solution {
    /// Creates a solution from customer sequences.
    pub fn new(routes: Vec<Vec<usize>>) -> Self {
        Self { routes }
    }

    /// Returns the routes as customer sequences.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Returns mutable routes.
    pub fn routes_mut(&mut self) -> &mut Vec<Vec<usize>> {
        &mut self.routes
    }

    /// Consumes the solution, returning its routes.
    pub fn into_routes(self) -> Vec<Vec<usize>> {
        self.routes
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of customer visits across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Returns `true` if there are no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All visited customers in route order.
    pub fn visits(&self) -> impl Iterator<Item = usize> + '_ {
        self.routes.iter().flat_map(|r| r.iter().copied())
    }

    /// Removes empty routes.
    pub fn remove_empty_routes(&mut self) {
        self.routes.retain(|r| !r.is_empty());
    }
}

impl From<Vec<Vec<usize>>> for Solution {
    fn from(routes: Vec<Vec<usize>>) -> Self {
        Self::new(routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_empty() {
        let sol = Solution::default();
        assert!(sol.is_empty());
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.num_served(), 0);
    }

    #[test]
    fn test_solution_visits() {
        let sol = Solution::new(vec![vec![3, 1], vec![2]]);
        assert_eq!(sol.visits().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(sol.clone().into_routes(), vec![vec![3, 1], vec![2]]);
    }

    #[test]
    fn test_remove_empty_routes() {
        let mut sol = Solution::new(vec![vec![], vec![1], vec![], vec![2]]);
        sol.remove_empty_routes();
        assert_eq!(sol.routes(), &[vec![1], vec![2]]);
    }

    #[test]
    fn test_violation_display() {
        let v = Violation::new(ViolationType::CapacityExceeded {
            route_index: 0,
            load: 12,
            capacity: 10,
        });
        assert_eq!(v.to_string(), "route 0 load 12 exceeds capacity 10");

        let v = Violation::new(ViolationType::MissingCustomers(vec![2, 5]));
        assert_eq!(v.to_string(), "customers not visited: [2, 5]");
    }

    #[test]
    fn test_serializes_as_nested_lists() {
        let sol = Solution::new(vec![vec![1, 2], vec![3]]);
        let json = serde_json::to_string(&sol).expect("serialize");
        assert_eq!(json, "[[1,2],[3]]");
    }
}
