//! shiftforge Core - Domain types for single-shift duty planning
//!
//! This crate provides the fundamental abstractions for shiftforge:
//! - Store hours and slot arithmetic
//! - Employees, shifts and the day's roster
//! - The duty grid (`Assignment`) that every engine produces
//! - Score types for comparing candidate grids
//! - The error taxonomy shared by every crate

pub mod assignment;
pub mod duty;
pub mod employee;
pub mod error;
pub mod roster;
pub mod score;
pub mod shift;
pub mod time;

pub use assignment::Assignment;
pub use duty::Duty;
pub use employee::{Capabilities, Employee, EmployeeId};
pub use error::{Result, ShiftforgeError};
pub use roster::{RegisterTarget, Roster};
pub use score::{HardMediumSoftScore, Score, ScoreLevel};
pub use shift::{BreakLunchOrder, Shift, ShiftKind};
pub use time::{SlotRange, StoreHours};
