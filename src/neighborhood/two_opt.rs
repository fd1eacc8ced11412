//! Intra-route 2-opt move.
//!
//! # Algorithm
//!
//! Picks a route with at least three customers and two positions `i < j`
//! in it, then reverses the segment `route[i..=j]`. Load is unchanged, so
//! the move is always capacity-safe.
//!
//! # Reference
//!
//! Croes, G. A. (1958). "A Method for Solving Traveling-Salesman Problems",
//! *Operations Research* 6(6), 791-812.

use rand::Rng;

use crate::models::{ProblemInstance, Solution};

use super::distinct_pair;

/// Applies a random segment reversal to a copy of `solution`.
///
/// Returns `None` if no route has three or more customers.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::{ProblemInstance, Solution};
/// use cvrp_anneal::neighborhood::two_opt_move;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 1, 1, 1], 0, 10, 1);
/// let solution = Solution::new(vec![vec![1, 2, 3]]);
///
/// let mut rng = u_numflow::random::create_rng(42);
/// let neighbor = two_opt_move(&instance, &solution, &mut rng).unwrap();
/// assert_ne!(neighbor, solution);
/// ```
pub fn two_opt_move<R: Rng>(
    _instance: &ProblemInstance,
    solution: &Solution,
    rng: &mut R,
) -> Option<Solution> {
    let eligible: Vec<usize> = solution
        .routes()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.len() >= 3)
        .map(|(ri, _)| ri)
        .collect();
    if eligible.is_empty() {
        return None;
    }

    let ri = eligible[rng.random_range(0..eligible.len())];
    let (a, b) = distinct_pair(rng, solution.routes()[ri].len());
    let (i, j) = (a.min(b), a.max(b));

    let mut neighbor = solution.clone();
    neighbor.routes_mut()[ri][i..=j].reverse();
    Some(neighbor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::test_support::line_instance;
    use u_numflow::random::create_rng;

    #[test]
    fn test_two_opt_reverses_a_segment() {
        let inst = line_instance(vec![0, 1, 1, 1, 1], 10, 1);
        let sol = Solution::new(vec![vec![1, 2, 3, 4]]);
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let n = two_opt_move(&inst, &sol, &mut rng).expect("route is long enough");
            let route = &n.routes()[0];
            // The changed positions form one contiguous reversed block
            let first = route.iter().zip(&sol.routes()[0]).position(|(a, b)| a != b);
            let last = route.iter().zip(&sol.routes()[0]).rposition(|(a, b)| a != b);
            let (i, j) = (first.unwrap(), last.unwrap());
            let mut expected = sol.routes()[0].clone();
            expected[i..=j].reverse();
            assert_eq!(route, &expected);
        }
    }

    #[test]
    fn test_two_opt_needs_three_customers() {
        let inst = line_instance(vec![0, 1, 1, 1], 10, 2);
        let sol = Solution::new(vec![vec![1, 2], vec![3]]);
        let mut rng = create_rng(42);
        assert!(two_opt_move(&inst, &sol, &mut rng).is_none());
    }

    #[test]
    fn test_two_opt_touches_one_route() {
        let inst = line_instance(vec![0, 1, 1, 1, 1, 1], 10, 2);
        let sol = Solution::new(vec![vec![1, 2, 3], vec![4, 5]]);
        let mut rng = create_rng(7);
        for _ in 0..50 {
            let n = two_opt_move(&inst, &sol, &mut rng).expect("first route qualifies");
            assert_eq!(n.routes()[1], vec![4, 5]);
        }
    }
}
