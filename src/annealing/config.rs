//! Annealing configuration.

use serde::{Deserialize, Serialize};
use u_metaheur::sa::{CoolingSchedule, SaConfig};

use crate::error::SolveError;
use crate::neighborhood::DEFAULT_MAX_ATTEMPTS;

/// Parameters of an annealing run.
///
/// Deserializes with `#[serde(default)]`, so a host can pass only the
/// parameters it wants to override. `max_iterations` and
/// `iterations_per_temp` are accepted as aliases of the outer and inner
/// iteration counts.
///
/// # Examples
///
/// ```
/// use cvrp_anneal::annealing::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.95)
///     .with_max_outer_iterations(200)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// The run stops once the temperature is at or below this value.
    pub final_temperature: f64,

    /// Multiplicative decay per outer iteration, in (0, 1).
    pub cooling_rate: f64,

    /// Upper bound on temperature levels.
    #[serde(alias = "max_iterations")]
    pub max_outer_iterations: usize,

    /// Candidates evaluated at each temperature level.
    #[serde(alias = "iterations_per_temp")]
    pub inner_iterations_per_temperature: usize,

    /// Inner iterations between two progress reports.
    pub callback_interval: usize,

    /// Operator draws per neighbor before falling back to the current solution.
    pub max_neighbor_attempts: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            final_temperature: 1.0,
            cooling_rate: 0.98,
            max_outer_iterations: 1000,
            inner_iterations_per_temperature: 100,
            callback_interval: 10,
            max_neighbor_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_final_temperature(mut self, t: f64) -> Self {
        self.final_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_outer_iterations(mut self, n: usize) -> Self {
        self.max_outer_iterations = n;
        self
    }

    pub fn with_inner_iterations(mut self, n: usize) -> Self {
        self.inner_iterations_per_temperature = n;
        self
    }

    pub fn with_callback_interval(mut self, n: usize) -> Self {
        self.callback_interval = n;
        self
    }

    pub fn with_max_neighbor_attempts(mut self, n: usize) -> Self {
        self.max_neighbor_attempts = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SolveError> {
        let invalid = |msg: String| Err(SolveError::InvalidParameter(msg));

        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return invalid(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            ));
        }
        if !self.final_temperature.is_finite() || self.final_temperature < 0.0 {
            return invalid(format!(
                "final_temperature must be non-negative, got {}",
                self.final_temperature
            ));
        }
        if self.final_temperature >= self.initial_temperature {
            return invalid("final_temperature must be less than initial_temperature".into());
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return invalid(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            ));
        }
        if self.inner_iterations_per_temperature == 0 {
            return invalid("inner_iterations_per_temperature must be at least 1".into());
        }
        if self.callback_interval == 0 {
            return invalid("callback_interval must be at least 1".into());
        }
        if self.max_neighbor_attempts == 0 {
            return invalid("max_neighbor_attempts must be at least 1".into());
        }
        Ok(())
    }

    /// Equivalent settings for the generic [`SaRunner`](u_metaheur::sa::SaRunner).
    ///
    /// The generic runner needs a strictly positive minimum temperature and
    /// counts total iterations, so the outer/inner budget is flattened.
    pub fn to_sa_config(&self) -> SaConfig {
        let mut config = SaConfig::default()
            .with_initial_temperature(self.initial_temperature)
            .with_min_temperature(self.final_temperature.max(f64::MIN_POSITIVE))
            .with_cooling(CoolingSchedule::Geometric {
                alpha: self.cooling_rate,
            })
            .with_iterations_per_temperature(self.inner_iterations_per_temperature)
            .with_max_iterations(
                // 0 means unlimited to the generic runner
                self.max_outer_iterations
                    .saturating_mul(self.inner_iterations_per_temperature)
                    .max(1),
            );
        config.seed = self.seed;
        config
    }
}
