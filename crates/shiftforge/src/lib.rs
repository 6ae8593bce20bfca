//! shiftforge - duty scheduling for one store shift.
//!
//! Given a roster for one day, [`plan_day`] asks a solving engine for a
//! schedule under progressively looser imbalance caps, falls back to a
//! weighted model when every cap pair fails, then refines the result
//! toward the idealistic goals without giving up anything it already
//! satisfied.
//!
//! # Example
//!
//! ```rust
//! use shiftforge::prelude::*;
//!
//! let caps = CapPair::capped(1, 2);
//! assert_eq!(caps.to_string(), "(1,2)");
//! assert_eq!(HardMediumSoftScore::ZERO.to_string(), "0hard/0medium/0soft");
//! ```

// Domain model
pub use shiftforge_core::{
    Assignment, Duty, Employee, EmployeeId, HardMediumSoftScore, RegisterTarget, Result, Roster,
    Shift, ShiftKind, ShiftforgeError, StoreHours,
};

// Constraint catalog and model configurations
pub use shiftforge_constraints::{
    CapPair, Catalog, ConstraintSpec, ImbalanceKind, ImbalancePolicy, ModelConfiguration, Tier,
};

// Configuration files
pub use shiftforge_config::{PlannerConfig, RelaxationConfig, RosterConfig, TimeoutPolicy, Weekday};

// Engines, orchestration and results
pub use shiftforge_solver::{
    AttemptRecord, LocalSearchEngine, Orchestrator, Refinement, Schedule, SolveOutcome,
    SolveRequest, SolveStatus, SolvingEngine, Stage,
};

#[cfg(feature = "console")]
pub use shiftforge_console as console;

mod planner;
pub use planner::{plan_day, plan_roster, plan_with};

pub mod prelude {
    pub use super::{plan_day, plan_roster, plan_with};
    pub use super::{Assignment, Duty, HardMediumSoftScore, Roster, Schedule, ShiftforgeError};
    pub use super::{CapPair, Catalog, PlannerConfig, RosterConfig, Weekday};
    pub use super::{Refinement, SolveStatus, SolvingEngine, Stage};
}
