//! Dense distance matrix.

use serde::{Deserialize, Serialize};

/// A dense n×n distance matrix stored in row-major order.
///
/// Entries are travel costs between node indices. Symmetry is not required.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (0.0, 8.0)]);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    fn zeros(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean (straight-line) matrix from planar coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut dm = Self::zeros(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[i].0 - points[j].0;
                let dy = points[i].1 - points[j].1;
                let d = (dx * dx + dy * dy).sqrt();
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from nested rows, as supplied by a caller
    /// with its own (possibly asymmetric) travel costs.
    ///
    /// Returns `None` if the rows do not form a square grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvrp_anneal::distance::DistanceMatrix;
    ///
    /// let dm = DistanceMatrix::from_rows(&[vec![0.0, 2.0], vec![3.0, 0.0]]).unwrap();
    /// assert_eq!(dm.get(1, 0), 3.0);
    /// assert!(DistanceMatrix::from_rows(&[vec![0.0, 2.0], vec![3.0]]).is_none());
    /// ```
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.iter().flatten().copied().collect(),
            size,
        })
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the first entry that is negative or non-finite, or a non-zero
    /// diagonal entry, as `(from, to, value)`.
    pub fn first_invalid_entry(&self) -> Option<(usize, usize, f64)> {
        for i in 0..self.size {
            for j in 0..self.size {
                let d = self.get(i, j);
                let bad_diagonal = i == j && d != 0.0;
                if !d.is_finite() || d < 0.0 || bad_diagonal {
                    return Some((i, j, d));
                }
            }
        }
        None
    }
}
