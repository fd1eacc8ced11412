//! Seeded random instance generation.
//!
//! Nodes are scattered uniformly over a 100×100 square, distances are
//! Euclidean, and each customer gets an integer demand in `1..10`.

use rand::Rng;
use u_numflow::random::create_rng;

use crate::distance::DistanceMatrix;
use crate::error::SolveError;

use super::{Node, ProblemInstance};

const SIDE: f64 = 100.0;

/// Parameters for [`random_instance`].
#[derive(Debug, Clone)]
pub struct RandomInstanceSpec {
    /// Number of nodes, depot included.
    pub num_nodes: usize,
    /// Depot index.
    pub depot: usize,
    /// Capacity of every vehicle.
    pub vehicle_capacity: i32,
    /// Fleet size.
    pub max_vehicles: usize,
    /// Random seed.
    pub seed: u64,
}

impl Default for RandomInstanceSpec {
    fn default() -> Self {
        Self {
            num_nodes: 10,
            depot: 0,
            vehicle_capacity: 20,
            max_vehicles: 5,
            seed: 42,
        }
    }
}

impl RandomInstanceSpec {
    pub fn with_num_nodes(mut self, n: usize) -> Self {
        self.num_nodes = n;
        self
    }

    pub fn with_depot(mut self, depot: usize) -> Self {
        self.depot = depot;
        self
    }

    pub fn with_vehicle_capacity(mut self, capacity: i32) -> Self {
        self.vehicle_capacity = capacity;
        self
    }

    pub fn with_max_vehicles(mut self, n: usize) -> Self {
        self.max_vehicles = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A generated instance together with the node metadata it was built from.
#[derive(Debug, Clone)]
pub struct GeneratedInstance {
    /// The solver input.
    pub instance: ProblemInstance,
    /// Coordinates, demands and names, indexed like the instance.
    pub nodes: Vec<Node>,
}

impl GeneratedInstance {
    /// Display names in node order.
    pub fn names(&self) -> Vec<String> {
        self.nodes.iter().map(Node::display_name).collect()
    }

    /// Coordinates in node order.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.nodes.iter().map(|n| (n.x(), n.y())).collect()
    }
}

/// Generates a random Euclidean instance.
///
/// The depot is named `"Depot"`, customers `"Customer {i}"`. The same parameters
/// always yield the same instance.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::models::{random_instance, RandomInstanceSpec};
///
/// let generated = random_instance(&RandomInstanceSpec::default().with_num_nodes(8)).unwrap();
/// assert_eq!(generated.instance.num_nodes(), 8);
/// assert_eq!(generated.names()[0], "Depot");
/// assert_eq!(generated.instance.demand(0), 0);
/// ```
pub fn random_instance(spec: &RandomInstanceSpec) -> Result<GeneratedInstance, SolveError> {
    if spec.depot >= spec.num_nodes {
        return Err(SolveError::DepotOutOfRange {
            depot: spec.depot,
            nodes: spec.num_nodes,
        });
    }

    let mut rng = create_rng(spec.seed);
    let points: Vec<(f64, f64)> = (0..spec.num_nodes)
        .map(|_| (rng.random_range(0.0..SIDE), rng.random_range(0.0..SIDE)))
        .collect();

    let mut nodes = Vec::with_capacity(spec.num_nodes);
    let mut demands = Vec::with_capacity(spec.num_nodes);
    for (i, &(x, y)) in points.iter().enumerate() {
        if i == spec.depot {
            demands.push(0);
            nodes.push(Node::new(i, x, y, 0).with_name("Depot"));
        } else {
            let demand = rng.random_range(1..10);
            demands.push(demand);
            nodes.push(Node::new(i, x, y, demand).with_name(format!("Customer {i}")));
        }
    }

    let instance = ProblemInstance::new(
        DistanceMatrix::from_points(&points),
        demands,
        spec.depot,
        spec.vehicle_capacity,
        spec.max_vehicles,
    );
    Ok(GeneratedInstance { instance, nodes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_shape() {
        let g = random_instance(&RandomInstanceSpec::default().with_num_nodes(12).with_depot(3))
            .expect("valid spec");
        assert_eq!(g.instance.num_nodes(), 12);
        assert_eq!(g.nodes.len(), 12);
        assert_eq!(g.instance.depot(), 3);
        assert_eq!(g.instance.demand(3), 0);
        assert_eq!(g.names()[3], "Depot");
        assert_eq!(g.names()[4], "Customer 4");
        for c in g.instance.customers() {
            let d = g.instance.demand(c);
            assert!((1..10).contains(&d), "demand {d} out of range");
        }
        for (x, y) in g.points() {
            assert!((0.0..SIDE).contains(&x) && (0.0..SIDE).contains(&y));
        }
    }

    #[test]
    fn test_generated_distances_match_points() {
        let g = random_instance(&RandomInstanceSpec::default()).expect("valid spec");
        let p = g.points();
        let expected = ((p[1].0 - p[2].0).powi(2) + (p[1].1 - p[2].1).powi(2)).sqrt();
        assert!((g.instance.distance(1, 2) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_same_seed_same_instance() {
        let spec = RandomInstanceSpec::default().with_seed(7);
        let a = random_instance(&spec).expect("valid spec");
        let b = random_instance(&spec).expect("valid spec");
        assert_eq!(a.instance, b.instance);
    }

    #[test]
    fn test_depot_out_of_range() {
        let spec = RandomInstanceSpec::default().with_num_nodes(5).with_depot(5);
        assert!(matches!(
            random_instance(&spec),
            Err(SolveError::DepotOutOfRange { depot: 5, nodes: 5 })
        ));
    }
}
