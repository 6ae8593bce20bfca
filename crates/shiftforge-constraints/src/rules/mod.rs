//! Concrete rules of the standard catalog.
//!
//! - [`hard`]: structural rules every schedule must satisfy
//! - [`soft`]: preferences enforced unless relaxed
//! - [`idealistic`]: quality penalties minimized during refinement

pub mod hard;
pub mod idealistic;
pub mod soft;

use shiftforge_core::{Assignment, Duty, EmployeeId, Roster};

/// Who a group-scoped rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    FullTime,
    DesignatedCashiers,
    FloorCoverage,
}

impl Group {
    pub fn members(self, roster: &Roster) -> Vec<EmployeeId> {
        match self {
            Group::FullTime => roster.full_timers(),
            Group::DesignatedCashiers => roster.designated_cashiers(),
            Group::FloorCoverage => roster.floor_coverage(),
        }
    }
}

/// First break, last break and lunch start of one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Landmarks {
    pub break1: usize,
    pub break2: usize,
    pub lunch: usize,
}

impl Landmarks {
    /// Returns `None` while the employee has no break or no lunch.
    pub fn of(grid: &Assignment, employee: EmployeeId) -> Option<Self> {
        let row = grid.row(employee);
        Some(Self {
            break1: row.iter().position(|d| *d == Duty::Break)?,
            break2: row.iter().rposition(|d| *d == Duty::Break)?,
            lunch: first_slot(grid, employee, Duty::Lunch)?,
        })
    }
}

pub(crate) fn first_slot(grid: &Assignment, employee: EmployeeId, duty: Duty) -> Option<usize> {
    grid.row(employee).iter().position(|d| *d == duty)
}

/// Hour (24h clock) in which a slot falls.
pub(crate) fn hour_of(roster: &Roster, slot: usize) -> u32 {
    let hours = roster.hours();
    hours.open_hour + (slot / hours.slots_per_hour()) as u32
}
