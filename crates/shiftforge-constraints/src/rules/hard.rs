//! Hard rules.
//!
//! Each rule counts its violations so that local search gets a gradient.
//! Where the roster alone rules a hard rule out, `prove_infeasible`
//! reports why; those proofs back the engine's Infeasible status.

use shiftforge_core::{Assignment, BreakLunchOrder, Duty, Roster};

use super::{hour_of, Landmarks};
use crate::spec::{ConstraintSpec, Rule};

/// The standard hard tier.
pub fn hard_rules() -> Vec<ConstraintSpec> {
    vec![
        ConstraintSpec::hard("shift-window", ShiftWindow),
        ConstraintSpec::hard("designated-cashier-duties", DesignatedCashierDuties),
        ConstraintSpec::hard("cashier-always", CashierAlways),
        ConstraintSpec::hard("register-count", RegisterCount),
        ConstraintSpec::hard("single-floor-cashier", SingleFloorCashier),
        ConstraintSpec::hard("two-breaks", TwoBreaks),
        ConstraintSpec::hard("one-lunch-hour", OneLunchHour),
        ConstraintSpec::hard("no-lunch-first-slot", NoLunchFirstSlot),
        ConstraintSpec::hard("meetings", Meetings),
        ConstraintSpec::hard("break-lunch-order", BreakLunchOrderRule),
    ]
}

/// Off-shift cells are unassigned and on-shift cells are not.
#[derive(Debug, Clone, Copy)]
pub struct ShiftWindow;

impl Rule for ShiftWindow {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let mut count = 0;
        for (id, e) in roster.employees().iter().enumerate() {
            for (slot, duty) in grid.row(id).iter().enumerate() {
                if e.is_here(slot) == (*duty == Duty::Unassigned) {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Designated cashiers never do floor, support or meeting duty.
#[derive(Debug, Clone, Copy)]
pub struct DesignatedCashierDuties;

impl Rule for DesignatedCashierDuties {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        roster
            .designated_cashiers()
            .into_iter()
            .flat_map(|id| grid.row(id).iter())
            .filter(|d| matches!(d, Duty::Other | Duty::Support | Duty::Meeting))
            .count() as u64
    }

    fn prove_infeasible(&self, roster: &Roster) -> Option<String> {
        roster
            .employees()
            .iter()
            .find(|e| e.is_designated_cashier() && !e.meetings.is_empty())
            .map(|e| format!("designated cashier {} has a meeting", e.name))
    }
}

/// At least one cashier during every slot of the day.
#[derive(Debug, Clone, Copy)]
pub struct CashierAlways;

impl Rule for CashierAlways {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        roster
            .day()
            .filter(|&slot| grid.count_at(slot, Duty::Cashier) == 0)
            .count() as u64
    }

    fn prove_infeasible(&self, roster: &Roster) -> Option<String> {
        let hours = roster.hours();
        for slot in roster.day() {
            if roster.free_at(slot) == 0 {
                return Some(format!("nobody is available at {}", hours.slot_to_time(slot)));
            }
            if roster.register_target(slot) == 0 {
                return Some(format!(
                    "register target is zero at {} but a cashier is required",
                    hours.slot_to_time(slot)
                ));
            }
        }
        None
    }
}

/// Cashier plus support matches the register target in every slot.
#[derive(Debug, Clone, Copy)]
pub struct RegisterCount;

impl Rule for RegisterCount {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        roster
            .day()
            .map(|slot| grid.register_at(slot).abs_diff(roster.register_target(slot)) as u64)
            .sum()
    }

    fn prove_infeasible(&self, roster: &Roster) -> Option<String> {
        roster.day().find_map(|slot| {
            let target = roster.register_target(slot);
            let free = roster.free_at(slot);
            (target > free).then(|| {
                format!(
                    "{} registers wanted at {} but only {} employees are available",
                    target,
                    roster.hours().slot_to_time(slot),
                    free
                )
            })
        })
    }
}

/// A regular employee only runs a register when nobody else does.
#[derive(Debug, Clone, Copy)]
pub struct SingleFloorCashier;

impl Rule for SingleFloorCashier {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let mut count = 0;
        for slot in roster.day() {
            let mut cashiers = 0;
            let mut floor_cashier = false;
            for (id, e) in roster.employees().iter().enumerate() {
                if grid.get(id, slot) == Duty::Cashier {
                    cashiers += 1;
                    floor_cashier |= !e.is_designated_cashier();
                }
            }
            if floor_cashier && cashiers > 1 {
                count += cashiers - 1;
            }
        }
        count
    }
}

/// Exactly two break slots per employee.
#[derive(Debug, Clone, Copy)]
pub struct TwoBreaks;

impl Rule for TwoBreaks {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        roster
            .employee_ids()
            .map(|id| grid.count_in_row(id, Duty::Break).abs_diff(2) as u64)
            .sum()
    }

    fn prove_infeasible(&self, roster: &Roster) -> Option<String> {
        let needed = roster.lunch_len() + 2;
        roster.employees().iter().find_map(|e| {
            let free = e.shift.window().filter(|&s| !e.in_meeting(s)).count();
            (free < needed).then(|| {
                format!(
                    "{} has {} free slots but needs {} for breaks and lunch",
                    e.name, free, needed
                )
            })
        })
    }
}

/// One lunch hour per employee, starting on the hour at 12, 1, 2 or 3.
#[derive(Debug, Clone, Copy)]
pub struct OneLunchHour;

impl Rule for OneLunchHour {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let len = roster.lunch_len();
        let starts = roster.lunch_starts();
        roster
            .employee_ids()
            .map(|id| {
                let runs = grid.runs(id, Duty::Lunch);
                let valid = matches!(runs.as_slice(), [run] if run.len() == len && starts.contains(&run.start));
                if valid {
                    0
                } else {
                    1 + grid.count_in_row(id, Duty::Lunch).abs_diff(len) as u64
                }
            })
            .sum()
    }

    fn prove_infeasible(&self, roster: &Roster) -> Option<String> {
        roster.employee_ids().find_map(|id| {
            roster
                .valid_lunch_starts(id)
                .is_empty()
                .then(|| format!("no lunch hour fits the shift of {}", roster.employee(id).name))
        })
    }
}

/// Nobody starts their shift with lunch.
#[derive(Debug, Clone, Copy)]
pub struct NoLunchFirstSlot;

impl Rule for NoLunchFirstSlot {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        roster
            .employees()
            .iter()
            .enumerate()
            .filter(|(id, e)| grid.get(*id, e.shift.start()) == Duty::Lunch)
            .count() as u64
    }
}

/// Meeting cells match the fixed meetings exactly.
#[derive(Debug, Clone, Copy)]
pub struct Meetings;

impl Rule for Meetings {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let mut count = 0;
        for (id, e) in roster.employees().iter().enumerate() {
            for (slot, duty) in grid.row(id).iter().enumerate() {
                if e.in_meeting(slot) != (*duty == Duty::Meeting) {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Breaks fall before or after lunch as the shift's order table says.
#[derive(Debug, Clone, Copy)]
pub struct BreakLunchOrderRule;

impl Rule for BreakLunchOrderRule {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let hours = roster.hours();
        roster
            .employees()
            .iter()
            .enumerate()
            .filter_map(|(id, e)| Landmarks::of(grid, id).map(|m| (e, m)))
            .filter(|(e, m)| {
                let order = e.shift.break_lunch_order(hour_of(roster, m.lunch), hours);
                let ok = match order {
                    BreakLunchOrder::LunchFirst => m.lunch < m.break1,
                    BreakLunchOrder::LunchBetween => m.break1 < m.lunch && m.lunch < m.break2,
                    BreakLunchOrder::LunchLast => m.break2 < m.lunch,
                };
                !ok
            })
            .count() as u64
    }
}

#[cfg(test)]
#[path = "hard_tests.rs"]
mod tests;
