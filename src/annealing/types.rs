//! Progress and result types of an annealing run.

use serde::{Deserialize, Serialize};

use crate::constructive::ConstructionMethod;
use crate::models::Solution;

/// Lifecycle of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Input accepted, initial solution being built.
    Initializing,
    /// Annealing loop in progress.
    Running,
    /// Finished with a result.
    Completed,
    /// Rejected at entry or the worker died.
    Failed,
}

impl RunState {
    /// Whether no further transitions can happen.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Completed | RunState::Failed)
    }
}

/// A progress report emitted during the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based temperature level.
    pub outer_iteration: usize,
    /// Inner iteration within the level. Equals the per-level count on the
    /// report sent after the level completes.
    pub inner_iteration: usize,
    /// Temperature at the time of the report.
    pub temperature: f64,
    /// Best total distance found so far.
    pub best_cost: f64,
    /// `outer_iteration / max_outer_iterations` as a percentage, capped at 100.
    pub percent_complete: u8,
}

/// Receives progress reports synchronously from the search loop.
///
/// Implementations should return quickly; a slow observer stalls the search.
/// Closures taking `&Progress` implement this trait, and `()` ignores every
/// report.
pub trait ProgressObserver {
    /// Called every `callback_interval` inner iterations and once after each
    /// temperature level.
    fn on_progress(&mut self, progress: &Progress);
}

impl<F: FnMut(&Progress)> ProgressObserver for F {
    fn on_progress(&mut self, progress: &Progress) {
        self(progress)
    }
}

impl ProgressObserver for () {
    fn on_progress(&mut self, _progress: &Progress) {}
}

/// One entry of a per-level history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Outer iteration the value was recorded after (0 = before the loop).
    pub iteration: usize,
    /// Recorded value.
    pub value: f64,
}

/// Outcome of [`solve`](super::solve).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnealingResult {
    /// Best solution found, repaired if it failed final validation.
    pub solution: Solution,

    /// Total distance of `solution`.
    pub best_cost: f64,

    /// Best cost at the start and after every temperature level.
    pub cost_history: Vec<HistoryPoint>,

    /// Temperature at the start and after every temperature level.
    pub temperature_history: Vec<HistoryPoint>,

    /// Temperature levels completed.
    pub outer_iterations: usize,

    /// Candidates evaluated.
    pub evaluations: usize,

    /// Accepted candidates, including improvements.
    pub accepted_moves: usize,

    /// Candidates strictly cheaper than the current solution.
    pub improving_moves: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Heuristic that produced the initial solution.
    pub construction: ConstructionMethod,

    /// Whether the final solution needed repair.
    pub repaired: bool,

    /// Violations left after repair; empty for a valid result.
    pub remaining_violations: Vec<String>,
}

impl AnnealingResult {
    /// Routes of the best solution.
    pub fn routes(&self) -> &[Vec<usize>] {
        self.solution.routes()
    }

    /// Whether the returned solution satisfies every invariant.
    pub fn is_valid(&self) -> bool {
        self.remaining_violations.is_empty()
    }

    /// Serializes the result as JSON.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |p: &Progress| seen.push(p.percent_complete);
            let progress = Progress {
                outer_iteration: 1,
                inner_iteration: 0,
                temperature: 10.0,
                best_cost: 3.0,
                percent_complete: 50,
            };
            observer.on_progress(&progress);
            observer.on_progress(&progress);
        }
        assert_eq!(seen, vec![50, 50]);
    }

    #[test]
    fn test_run_state_terminal() {
        assert!(!RunState::Initializing.is_terminal());
        assert!(!RunState::Running.is_terminal());
        assert!(RunState::Completed.is_terminal());
        assert!(RunState::Failed.is_terminal());
    }

    #[test]
    fn test_run_state_serde() {
        let json = serde_json::to_string(&RunState::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
