//! Background solve on a dedicated worker thread.
//!
//! The worker forwards every progress report over a channel without
//! waiting, so the search loop never blocks on the host. The host polls
//! [`SolveJob::status`] and collects the outcome with [`SolveJob::join`].

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SolveError;
use crate::models::ProblemInstance;
use crate::report::{describe, SolutionReport};

use super::config::AnnealingConfig;
use super::runner::solve;
use super::types::{AnnealingResult, Progress, RunState};

/// Latest known state of a job, as a host would expose it for polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    /// Lifecycle state.
    pub state: RunState,
    /// Percentage of the outer budget completed.
    pub percent_complete: u8,
    /// Human-readable status line, or the error for a failed job.
    pub message: String,
    /// Most recent progress report, if any.
    pub progress: Option<Progress>,
}

impl Default for JobStatus {
    fn default() -> Self {
        Self {
            state: RunState::Initializing,
            percent_complete: 0,
            message: "Initializing".into(),
            progress: None,
        }
    }
}

/// Result and report of a finished job.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// Search result.
    pub result: AnnealingResult,
    /// Report of the best solution.
    pub report: SolutionReport,
}

enum JobEvent {
    Running,
    Progress(Progress),
    Finished(Option<String>),
}

/// A solve running on its own thread.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::annealing::{AnnealingConfig, RunState, SolveJob};
/// use cvrp_anneal::models::{random_instance, RandomInstanceSpec};
///
/// let generated = random_instance(&RandomInstanceSpec::default()).unwrap();
/// let names = generated.names();
/// let config = AnnealingConfig::default()
///     .with_max_outer_iterations(20)
///     .with_inner_iterations(20)
///     .with_seed(42);
///
/// let job = SolveJob::spawn(generated.instance, config, Some(names));
/// let outcome = job.join().unwrap();
/// assert!(outcome.result.is_valid());
/// assert_eq!(outcome.report.routes[0].stops[0].name, "Depot");
/// ```
pub struct SolveJob {
    handle: JoinHandle<Result<JobOutcome, SolveError>>,
    events: Receiver<JobEvent>,
    status: JobStatus,
}

impl SolveJob {
    /// Starts solving `instance` in the background.
    ///
    /// `names` labels the stops of the final report.
    pub fn spawn(
        instance: ProblemInstance,
        config: AnnealingConfig,
        names: Option<Vec<String>>,
    ) -> Self {
        let (tx, events) = mpsc::channel();
        let handle = thread::spawn(move || {
            let outcome = run(&instance, &config, names.as_deref(), &tx);
            let error = outcome.as_ref().err().map(ToString::to_string);
            // The receiver may already be gone; nobody is left to tell
            let _ = tx.send(JobEvent::Finished(error));
            outcome
        });
        Self {
            handle,
            events,
            status: JobStatus::default(),
        }
    }

    /// Whether the worker has stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Applies pending updates from the worker and returns the latest status.
    pub fn status(&mut self) -> &JobStatus {
        for event in self.events.try_iter() {
            apply(&mut self.status, event);
        }
        &self.status
    }

    /// Waits for the worker and returns its outcome.
    pub fn join(self) -> Result<JobOutcome, SolveError> {
        self.handle.join().map_err(|_| {
            warn!("solver worker panicked");
            SolveError::WorkerPanicked
        })?
    }
}

fn run(
    instance: &ProblemInstance,
    config: &AnnealingConfig,
    names: Option<&[String]>,
    tx: &Sender<JobEvent>,
) -> Result<JobOutcome, SolveError> {
    instance.validate()?;
    config.validate()?;
    let _ = tx.send(JobEvent::Running);

    let result = solve(instance, config, |progress: &Progress| {
        let _ = tx.send(JobEvent::Progress(*progress));
    })?;
    let report = describe(instance, &result.solution, result.best_cost, names);
    Ok(JobOutcome { result, report })
}

fn apply(status: &mut JobStatus, event: JobEvent) {
    match event {
        JobEvent::Running => {
            status.state = RunState::Running;
            status.message = "Running optimization".into();
        }
        JobEvent::Progress(progress) => {
            status.percent_complete = progress.percent_complete;
            status.progress = Some(progress);
        }
        JobEvent::Finished(None) => {
            status.state = RunState::Completed;
            status.percent_complete = 100;
            status.message = "Optimization complete".into();
        }
        JobEvent::Finished(Some(error)) => {
            status.state = RunState::Failed;
            status.message = error;
        }
    }
}
