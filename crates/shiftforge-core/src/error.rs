//! Error types for shiftforge

use thiserror::Error;

/// Main error type for shiftforge operations.
///
/// Only [`ShiftforgeError::Config`] and [`ShiftforgeError::HardInfeasible`] are
/// expected at runtime; every other non-ideal planning outcome is absorbed by
/// the orchestrator and reported as schedule metadata.
#[derive(Debug, Error)]
pub enum ShiftforgeError {
    /// The supplied roster or planner settings are inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The hard constraints alone admit no schedule.
    #[error("Hard constraint '{constraint}' cannot be satisfied: {reason}")]
    HardInfeasible { constraint: String, reason: String },

    /// A hard constraint was asked to be relaxed.
    #[error("Hard constraint '{0}' can never be relaxed")]
    HardRelaxation(String),

    /// A time string could not be mapped onto the store's slots.
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// No engine call produced a usable schedule in time.
    #[error("No schedule found: {0}")]
    Unsolved(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShiftforgeError {
    /// Returns true for errors that stem from the user's configuration rather
    /// than from a defect or an exhausted time budget.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ShiftforgeError::Config(_)
                | ShiftforgeError::HardInfeasible { .. }
                | ShiftforgeError::InvalidTime(_)
        )
    }
}

/// Result type alias for shiftforge operations
pub type Result<T> = std::result::Result<T, ShiftforgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_infeasible_message() {
        let err = ShiftforgeError::HardInfeasible {
            constraint: "register-count".to_string(),
            reason: "3 registers at 12:00 but 2 people".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Hard constraint 'register-count' cannot be satisfied: 3 registers at 12:00 but 2 people"
        );
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_relaxation_is_not_configuration() {
        let err = ShiftforgeError::HardRelaxation("two-breaks".to_string());
        assert!(!err.is_configuration_error());
    }
}
