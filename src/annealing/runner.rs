//! Annealing loop.

use rand::Rng;
use tracing::{debug, info, warn};
use u_numflow::random::create_rng;

use crate::constructive::initial_solution;
use crate::error::SolveError;
use crate::evaluation::{repair, total_distance, FeasibilityChecker};
use crate::models::{ProblemInstance, Solution};
use crate::neighborhood::NeighborGenerator;

use super::config::AnnealingConfig;
use super::types::{AnnealingResult, HistoryPoint, Progress, ProgressObserver};

/// Solves a CVRP instance by simulated annealing.
///
/// The instance and configuration are validated first; any problem there is
/// returned as an error before the search starts. From then on the run
/// always succeeds: infeasible candidates are discarded and a final best that
/// fails validation is repaired.
///
/// # Algorithm
///
/// 1. Build the initial solution ([`initial_solution`]), with its capacity
///    overflow already reduced as far as the construction can.
/// 2. While `T > final_temperature` and the outer budget remains, evaluate
///    `inner_iterations_per_temperature` neighbors. A cheaper neighbor is
///    accepted; a worse one with probability `exp(-delta / T)`.
/// 3. After each level, `T *= cooling_rate` and the histories are appended.
///
/// # Complexity
///
/// O(L × I × (a·n)) for L levels, I inner iterations, a neighbor attempts
/// and n customers (each attempt copies and checks a solution).
///
/// # Examples
///
/// ```
/// use cvrp_anneal::annealing::{solve, AnnealingConfig};
/// use cvrp_anneal::distance::DistanceMatrix;
/// use cvrp_anneal::models::ProblemInstance;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let instance = ProblemInstance::new(dm, vec![0, 3, 4, 5], 0, 10, 2);
/// let config = AnnealingConfig::default()
///     .with_max_outer_iterations(50)
///     .with_inner_iterations(20)
///     .with_seed(42);
///
/// let result = solve(&instance, &config, ()).unwrap();
/// assert!(result.is_valid());
/// assert!(result.routes().len() <= 2);
/// ```
pub fn solve<O: ProgressObserver>(
    instance: &ProblemInstance,
    config: &AnnealingConfig,
    mut observer: O,
) -> Result<AnnealingResult, SolveError> {
    instance.validate()?;
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    };

    info!(
        customers = instance.num_customers(),
        capacity = instance.vehicle_capacity(),
        vehicles = instance.max_vehicles(),
        seed = ?config.seed,
        "starting annealing"
    );

    let checker = FeasibilityChecker::new(instance);
    let generator =
        NeighborGenerator::new(instance).with_max_attempts(config.max_neighbor_attempts);

    let construction = initial_solution(instance);
    let mut current = construction.solution;
    let mut current_cost = total_distance(instance, &current);
    let mut best = current.clone();
    let mut best_cost = current_cost;

    let mut temperature = config.initial_temperature;
    let mut outer = 0usize;
    let mut evaluations = 0usize;
    let mut accepted_moves = 0usize;
    let mut improving_moves = 0usize;

    let mut cost_history = vec![HistoryPoint {
        iteration: 0,
        value: best_cost,
    }];
    let mut temperature_history = vec![HistoryPoint {
        iteration: 0,
        value: temperature,
    }];

    while temperature > config.final_temperature
        && temperature > 0.0
        && outer < config.max_outer_iterations
    {
        outer += 1;
        let percent_complete = percent(outer, config.max_outer_iterations);

        for inner in 0..config.inner_iterations_per_temperature {
            let candidate = generator.generate(&current, &mut rng);
            let candidate_cost = total_distance(instance, &candidate);
            let delta = candidate_cost - current_cost;
            evaluations += 1;

            let accept = if delta < 0.0 {
                improving_moves += 1;
                true
            } else {
                rng.random::<f64>() < (-delta / temperature).exp()
            };

            if accept {
                accepted_moves += 1;
                if candidate_cost < best_cost {
                    best = candidate.clone();
                    best_cost = candidate_cost;
                }
                current = candidate;
                current_cost = candidate_cost;
            }

            if inner % config.callback_interval == 0 {
                observer.on_progress(&Progress {
                    outer_iteration: outer,
                    inner_iteration: inner,
                    temperature,
                    best_cost,
                    percent_complete,
                });
            }
        }

        temperature *= config.cooling_rate;
        cost_history.push(HistoryPoint {
            iteration: outer,
            value: best_cost,
        });
        temperature_history.push(HistoryPoint {
            iteration: outer,
            value: temperature,
        });
        debug!(outer, temperature, best_cost, current_cost, "temperature level done");

        observer.on_progress(&Progress {
            outer_iteration: outer,
            inner_iteration: config.inner_iterations_per_temperature,
            temperature,
            best_cost,
            percent_complete,
        });
    }

    let (solution, best_cost, repaired) = finalize(instance, &checker, best, best_cost);
    let remaining_violations: Vec<String> = checker
        .violations(&solution)
        .iter()
        .map(ToString::to_string)
        .collect();
    if !remaining_violations.is_empty() {
        warn!(
            violations = ?remaining_violations,
            "returning a solution that still violates constraints"
        );
    }

    info!(
        best_cost,
        routes = solution.num_routes(),
        outer_iterations = outer,
        accepted_moves,
        improving_moves,
        repaired,
        "annealing finished"
    );

    Ok(AnnealingResult {
        solution,
        best_cost,
        cost_history,
        temperature_history,
        outer_iterations: outer,
        evaluations,
        accepted_moves,
        improving_moves,
        final_temperature: temperature,
        construction: construction.method,
        repaired,
        remaining_violations,
    })
}

/// Re-validates the best solution and repairs it when needed.
fn finalize(
    instance: &ProblemInstance,
    checker: &FeasibilityChecker<'_>,
    best: Solution,
    best_cost: f64,
) -> (Solution, f64, bool) {
    match checker.validate(&best) {
        Ok(()) => (best, best_cost, false),
        Err(reason) => {
            warn!(%reason, "best solution failed validation, repairing");
            let repaired = repair(instance, &best);
            let cost = total_distance(instance, &repaired);
            (repaired, cost, true)
        }
    }
}

fn percent(outer: usize, max_outer: usize) -> u8 {
    if max_outer == 0 {
        return 100;
    }
    (outer.saturating_mul(100) / max_outer).min(100) as u8
}
