//! Solution report construction.

use serde::{Deserialize, Serialize};

use crate::evaluation::{route_distance, route_load};
use crate::models::{placeholder_name, ProblemInstance, Solution};

/// One stop of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Node index.
    pub index: usize,
    /// Given name, or `"Node {index}"`.
    pub name: String,
}

/// One route of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReport {
    /// 1-based route number.
    pub id: usize,
    /// Stops from depot to depot.
    pub stops: Vec<Stop>,
    /// Sum of customer demands on the route.
    pub load: i32,
    /// Vehicle capacity.
    pub capacity: i32,
    /// Length of the closed tour.
    pub distance: f64,
}

/// Report for a whole solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    /// Total distance as given by the caller.
    pub total_distance: f64,
    /// Routes in solution order.
    pub routes: Vec<RouteReport>,
}

impl SolutionReport {
    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Serializes the report as JSON.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Describes `solution` for display.
///
/// `names` is indexed by node; a node without an entry gets the placeholder
/// name `"Node {index}"`. Pure: the same input always gives the same report.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::{ProblemInstance, Solution};
/// use cvrp_anneal::report::describe;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 2], 0, 5, 1);
/// let names = vec!["Warehouse".to_string()];
///
/// let report = describe(&instance, &Solution::new(vec![vec![1]]), 10.0, Some(names.as_slice()));
/// let route = &report.routes[0];
/// assert_eq!(route.id, 1);
/// assert_eq!(route.stops[0].name, "Warehouse");
/// assert_eq!(route.stops[1].name, "Node 1");
/// assert_eq!(route.load, 2);
/// assert!((route.distance - 10.0).abs() < 1e-10);
/// ```
pub fn describe(
    instance: &ProblemInstance,
    solution: &Solution,
    cost: f64,
    names: Option<&[String]>,
) -> SolutionReport {
    let depot = instance.depot();
    let stop = |index: usize| Stop {
        index,
        name: names
            .and_then(|n| n.get(index))
            .cloned()
            .unwrap_or_else(|| placeholder_name(index)),
    };

    let routes = solution
        .routes()
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let mut stops = Vec::with_capacity(route.len() + 2);
            stops.push(stop(depot));
            stops.extend(route.iter().map(|&c| stop(c)));
            stops.push(stop(depot));
            RouteReport {
                id: i + 1,
                stops,
                load: route_load(instance, route),
                capacity: instance.vehicle_capacity(),
                distance: route_distance(instance, route),
            }
        })
        .collect();

    SolutionReport {
        total_distance: cost,
        routes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::evaluation::total_distance;

    fn setup() -> (ProblemInstance, Solution) {
        let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let inst = ProblemInstance::new(dm, vec![0, 3, 4, 5], 0, 10, 2);
        let sol = Solution::new(vec![vec![3, 2], vec![1]]);
        (inst, sol)
    }

    #[test]
    fn test_describe_shape() {
        let (inst, sol) = setup();
        let cost = total_distance(&inst, &sol);
        let report = describe(&inst, &sol, cost, None);

        assert_eq!(report.num_routes(), 2);
        assert!((report.total_distance - 8.0).abs() < 1e-10);

        let first = &report.routes[0];
        assert_eq!(first.id, 1);
        let indices: Vec<usize> = first.stops.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 3, 2, 0]);
        assert_eq!(first.stops[1].name, "Node 3");
        assert_eq!(first.load, 9);
        assert_eq!(first.capacity, 10);
        assert!((first.distance - 6.0).abs() < 1e-10);

        let second = &report.routes[1];
        assert_eq!(second.id, 2);
        assert_eq!(second.load, 3);
        assert!((second.distance - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_describe_names_with_short_list() {
        let (inst, sol) = setup();
        let names = vec!["Depot".to_string(), "Acme".to_string(), "Globex".to_string()];
        let report = describe(&inst, &sol, 8.0, Some(names.as_slice()));
        let first: Vec<&str> = report.routes[0]
            .stops
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(first, vec!["Depot", "Node 3", "Globex", "Depot"]);
    }

    #[test]
    fn test_describe_idempotent() {
        let (inst, sol) = setup();
        let a = describe(&inst, &sol, 8.0, None);
        let b = describe(&inst, &sol, 8.0, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_report_json_layout() {
        let (inst, sol) = setup();
        let report = describe(&inst, &sol, 8.0, None);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["routes"][0]["id"], 1);
        assert_eq!(value["routes"][0]["stops"][0]["index"], 0);
        assert_eq!(value["routes"][0]["stops"][0]["name"], "Node 0");
        assert_eq!(value["routes"][1]["load"], 3);
        assert_eq!(value["routes"][1]["capacity"], 10);
        assert!(value["total_distance"].is_number());
        assert!(value["routes"][0]["distance"].is_number());
    }
}
