//! Distance matrices.
//!
//! The solver only needs a dense node-to-node cost matrix; where it comes
//! from (explicit rows, planar coordinates) is the caller's concern.

mod matrix;

pub use matrix::DistanceMatrix;
