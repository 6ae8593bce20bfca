//! Configuration for shiftforge.
//!
//! Two files drive a planning run:
//! - a roster file ([`RosterConfig`]) with the employee directory, the
//!   weekly schedule, register targets and meetings
//! - an optional planner file ([`PlannerConfig`]) with stage time limits,
//!   the cap escalation order and engine tuning
//!
//! # Examples
//!
//! ```
//! use shiftforge_config::PlannerConfig;
//! use std::time::Duration;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     [relaxation]
//!     stage_a_seconds = 10
//!     cap_escalation = [[0, 0], [1, 1], [2, 2]]
//!
//!     [engine]
//!     random_seed = 7
//! "#).unwrap();
//!
//! assert_eq!(config.relaxation.stage_a_limit(), Duration::from_secs(10));
//! assert_eq!(config.relaxation.stage_b_limit(), Duration::from_secs(60));
//! assert_eq!(config.engine.random_seed, Some(7));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use shiftforge_config::PlannerConfig;
//!
//! let config = PlannerConfig::load_or_default("planner.toml").unwrap();
//! assert_eq!(config, PlannerConfig::default());
//! ```

use std::path::Path;

use shiftforge_core::ShiftforgeError;
use thiserror::Error;

pub mod planner;
pub mod roster;

pub use planner::{EngineConfig, MoveThreadCount, PlannerConfig, RelaxationConfig, TimeoutPolicy};
pub use roster::{DayConfig, EmployeeEntry, RosterConfig, ShiftEntry, TargetEntry, Weekday};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The parsed values were rejected by the domain model.
    #[error(transparent)]
    Model(#[from] ShiftforgeError),
}

impl ConfigError {
    /// Returns true if the file to load does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<ConfigError> for ShiftforgeError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Model(inner) => inner,
            other => ShiftforgeError::Config(other.to_string()),
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}

fn read(path: impl AsRef<Path>) -> Result<String, ConfigError> {
    Ok(std::fs::read_to_string(path)?)
}
