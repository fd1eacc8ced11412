//! Node metadata used for display.

use serde::{Deserialize, Serialize};

/// A location in a routing instance, as known to the caller.
///
/// The solver itself works on indices and the distance matrix only; names and
/// coordinates travel with the instance so reports and plots can label stops.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::models::Node;
///
/// let depot = Node::new(0, 35.0, 35.0, 0).with_name("Warehouse");
/// assert_eq!(depot.display_name(), "Warehouse");
///
/// let c = Node::new(3, 41.0, 49.0, 10);
/// assert_eq!(c.display_name(), "Node 3");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    index: usize,
    x: f64,
    y: f64,
    demand: i32,
    name: Option<String>,
}

impl Node {
    /// Creates an unnamed node.
    pub fn new(index: usize, x: f64, y: f64, demand: i32) -> Self {
        Self {
            index,
            x,
            y,
            demand,
            name: None,
        }
    }

    /// Sets a display name for this node.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Node index in the distance matrix.
    pub fn index(&self) -> usize {
        self.index
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Demand at this node.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// The given name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The given name, or the `Node {index}` placeholder.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => placeholder_name(self.index),
        }
    }
}

/// Placeholder label for a node without a name.
pub(crate) fn placeholder_name(index: usize) -> String {
    format!("Node {index}")
}
