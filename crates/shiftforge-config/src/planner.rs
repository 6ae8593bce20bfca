//! Planner settings: stage time limits, cap escalation and engine tuning.
//!
//! The time limits are tuned for a roster of roughly fifteen people on a
//! forty-slot day and may need recalibration for other scales.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shiftforge_constraints::{CapPair, ImbalancePolicy, DEFAULT_ESCALATION};

use crate::{is_yaml, read, ConfigError};

/// Main planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Stage time limits and the escalation order.
    #[serde(default)]
    pub relaxation: RelaxationConfig,

    /// Local search tuning.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl PlannerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML or YAML file, chosen by extension,
    /// and validates it.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, doesn't parse, or names an
    /// invalid escalation order.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if is_yaml(path) {
            Self::from_yaml_file(path)?
        } else {
            Self::from_toml_file(path)?
        };
        Ok(config)
    }

    /// Loads configuration like [`load`](Self::load), falling back to the
    /// defaults only when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns every read, parse and validation error other than a missing
    /// file.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(err) if err.is_not_found() => Ok(Self::default()),
            other => other,
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read(path)?)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml_str(&read(path)?)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the escalation order and time limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.relaxation;
        if r.stage_a_seconds == 0 || r.stage_b_seconds == 0 {
            return Err(ConfigError::Invalid(
                "stage time limits must be positive".to_string(),
            ));
        }
        if let TimeoutPolicy::RetryOnce { seconds } = r.timeout_policy {
            if seconds <= r.stage_a_seconds {
                return Err(ConfigError::Invalid(format!(
                    "retry limit of {seconds}s must exceed the stage A limit of {}s",
                    r.stage_a_seconds
                )));
            }
        }
        ImbalancePolicy::default().validate_escalation(&r.escalation())?;
        Ok(())
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.engine.random_seed = Some(seed);
        self
    }

    /// Sets every stage's time limit.
    pub fn with_stage_seconds(mut self, a: u64, b: u64, c: u64) -> Self {
        self.relaxation.stage_a_seconds = a;
        self.relaxation.stage_b_seconds = b;
        self.relaxation.stage_c_seconds = c;
        self
    }
}

/// Stage time limits and the Stage A escalation order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct RelaxationConfig {
    /// Limit for each capped attempt.
    pub stage_a_seconds: u64,

    /// Limit for the weighted fallback.
    pub stage_b_seconds: u64,

    /// Limit for idealistic refinement. Zero skips refinement.
    pub stage_c_seconds: u64,

    /// Cap pairs `[cashier, register]`, tightest first.
    pub cap_escalation: Vec<[u32; 2]>,

    /// What a timed-out capped attempt does.
    pub timeout_policy: TimeoutPolicy,

    /// Soft constraint ids left out of every stage's model.
    pub relaxed: Vec<String>,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            stage_a_seconds: 15,
            stage_b_seconds: 60,
            stage_c_seconds: 60,
            cap_escalation: DEFAULT_ESCALATION
                .iter()
                .filter_map(|pair| pair.values())
                .map(|(c, r)| [c, r])
                .collect(),
            timeout_policy: TimeoutPolicy::default(),
            relaxed: Vec::new(),
        }
    }
}

impl RelaxationConfig {
    pub fn stage_a_limit(&self) -> Duration {
        Duration::from_secs(self.stage_a_seconds)
    }

    pub fn stage_b_limit(&self) -> Duration {
        Duration::from_secs(self.stage_b_seconds)
    }

    pub fn stage_c_limit(&self) -> Duration {
        Duration::from_secs(self.stage_c_seconds)
    }

    /// The escalation order as cap pairs.
    pub fn escalation(&self) -> Vec<CapPair> {
        self.cap_escalation
            .iter()
            .map(|&[c, r]| CapPair::capped(c, r))
            .collect()
    }
}

/// Handling of an Unknown outcome in Stage A.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutPolicy {
    /// Move on to the next cap pair.
    #[default]
    Advance,

    /// Retry the same pair once with a longer limit, then move on.
    RetryOnce { seconds: u64 },
}

impl TimeoutPolicy {
    /// The limit for a retry, if the policy retries.
    pub fn retry_limit(&self) -> Option<Duration> {
        match self {
            TimeoutPolicy::Advance => None,
            TimeoutPolicy::RetryOnce { seconds } => Some(Duration::from_secs(*seconds)),
        }
    }
}

/// Local search tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct EngineConfig {
    /// Random seed for reproducible results.
    pub random_seed: Option<u64>,

    /// Length of the late acceptance score history.
    pub late_acceptance_size: usize,

    /// Candidate moves sampled per step.
    pub moves_per_step: usize,

    /// Number of threads for parallel move evaluation.
    pub move_thread_count: MoveThreadCount,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            random_seed: None,
            late_acceptance_size: 400,
            moves_per_step: 16,
            move_thread_count: MoveThreadCount::default(),
        }
    }
}

/// Move thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveThreadCount {
    /// Automatically determine thread count.
    #[default]
    Auto,

    /// No parallel move evaluation.
    None,

    /// Specific number of threads.
    Count(usize),
}

#[cfg(test)]
mod tests;
