//! Solving engines and the relaxation orchestrator for shiftforge.
//!
//! - [`SolvingEngine`]: the narrow contract every engine implements,
//!   with exactly four outcome statuses
//! - [`LocalSearchEngine`]: late acceptance local search over duty grids
//! - [`ScriptedEngine`]: replays scripted outcomes and records requests
//! - [`Orchestrator`]: escalating caps, weighted fallback, refinement
//! - [`ResultSelector`]: verifies and picks the final [`Schedule`]

pub mod engine;
pub mod local_search;
pub mod orchestrator;
pub mod scripted;
pub mod selector;

pub use engine::{InfeasibilityProof, SolveOutcome, SolveRequest, SolveStatus, SolvingEngine};
pub use local_search::LocalSearchEngine;
pub use orchestrator::Orchestrator;
pub use scripted::{RecordedRequest, ScriptedEngine};
pub use selector::{AttemptRecord, BasicSchedule, Refinement, ResultSelector, Schedule, Stage};
