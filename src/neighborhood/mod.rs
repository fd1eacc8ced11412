//! Randomized neighborhood moves for the annealing search.
//!
//! - [`swap_move`]: Exchange two customers, within a route or across two
//! - [`relocate_move`]: Move one customer to another (possibly new) route
//! - [`two_opt_move`]: Reverse a segment inside one route
//! - [`route_exchange_move`]: Swap the tails of two routes
//! - [`NeighborGenerator`]: Picks a move at random with bounded retries
//!
//! Every move works on a copy and returns `None` when the random draw leads
//! nowhere feasible; none of them mutates its input.

mod exchange;
mod generator;
mod relocate;
mod swap;
mod two_opt;

pub use exchange::route_exchange_move;
pub use generator::{MoveKind, NeighborGenerator, DEFAULT_MAX_ATTEMPTS};
pub use relocate::relocate_move;
pub use swap::swap_move;
pub use two_opt::two_opt_move;

use rand::Rng;

/// Whether a route may take `new_load` given it carried `old_load`.
///
/// Within capacity is always fine; a route already over capacity may keep or
/// shed load but never gain any.
pub(crate) fn load_fits(new_load: i32, old_load: i32, capacity: i32) -> bool {
    new_load <= capacity || new_load <= old_load
}

/// Two distinct indices drawn uniformly from `0..n`. Requires `n >= 2`.
pub(crate) fn distinct_pair<R: Rng>(rng: &mut R, n: usize) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}


#[cfg(test)]
mod tests {
    use super::*;
    use u_numflow::random::create_rng;

    #[test]
    fn test_load_fits() {
        assert!(load_fits(10, 4, 10));
        assert!(!load_fits(11, 4, 10));
        // Already over capacity: may shrink, may not grow
        assert!(load_fits(12, 14, 10));
        assert!(!load_fits(15, 14, 10));
    }

    #[test]
    fn test_distinct_pair() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let (a, b) = distinct_pair(&mut rng, 3);
            assert_ne!(a, b);
            assert!(a < 3 && b < 3);
        }
        let (a, b) = distinct_pair(&mut rng, 2);
        assert_eq!(a + b, 1);
    }
}
