//! Soft rules and their default weights.
//!
//! Weights rank the rules against each other when Stage B turns them into
//! optional terms. The imbalance family lives in [`crate::imbalance`].

use shiftforge_core::{Assignment, Duty, EmployeeId, Roster};

use super::{first_slot, Group, Landmarks};
use crate::spec::{ConstraintSpec, Rule};

const BREAK: &[Duty] = &[Duty::Break];
const LUNCH: &[Duty] = &[Duty::Lunch];
const BREAKROOM: &[Duty] = &[Duty::Break, Duty::Lunch];
const FLOOR: &[Duty] = &[Duty::Other];
const AVAILABLE: &[Duty] = &Duty::AVAILABLE;

/// The standard soft tier, excluding imbalance.
pub fn soft_rules() -> Vec<ConstraintSpec> {
    vec![
        ConstraintSpec::soft("aesthetics", 1, Aesthetics),
        ConstraintSpec::soft("break-3", 2, SimultaneousCap::new(BREAK, 3)),
        ConstraintSpec::soft("break-4", 3, SimultaneousCap::new(BREAK, 4)),
        ConstraintSpec::soft("break-5", 4, SimultaneousCap::new(BREAK, 5)),
        ConstraintSpec::soft("break-bound-gap-44", 4, BreakBoundGap::new(4, 4)),
        ConstraintSpec::soft("break-bound-gap-54", 2, BreakBoundGap::new(5, 4)),
        ConstraintSpec::soft("break-bound-gap-11", 999, BreakBoundGap::new(1, 1)),
        ConstraintSpec::soft("break-lunch-gap-3", 10, BreakLunchGap { gap: 3 }),
        ConstraintSpec::soft("break-lunch-gap-4", 4, BreakLunchGap { gap: 4 }),
        ConstraintSpec::soft(
            "breakroom-4-if-12",
            2,
            SimultaneousCap::new(BREAKROOM, 4).up_to_staff(12),
        ),
        ConstraintSpec::soft("breakroom-5", 3, SimultaneousCap::new(BREAKROOM, 5)),
        ConstraintSpec::soft("breakroom-6", 10, SimultaneousCap::new(BREAKROOM, 6)),
        ConstraintSpec::soft("breakroom-7", 999, SimultaneousCap::new(BREAKROOM, 7)),
        ConstraintSpec::soft(
            "diff-break-cashiers",
            8,
            SubgroupBreakroom(Group::DesignatedCashiers),
        ),
        ConstraintSpec::soft(
            "fulltime-avail",
            1,
            Availability::new(Group::FullTime, AVAILABLE, 0),
        ),
        ConstraintSpec::soft("lunch-4-if-16", 2, SimultaneousCap::new(LUNCH, 4).up_to_staff(16)),
        ConstraintSpec::soft("lunch-balance", 1, LunchBalance),
        ConstraintSpec::soft("lunch-fair-order", 2, LunchFairOrder),
        ConstraintSpec::soft("lunch-strict-bounds", 20, LunchStrictBounds),
        ConstraintSpec::soft(
            "coverage-avail",
            1,
            Availability::new(Group::FloorCoverage, FLOOR, 0),
        ),
        ConstraintSpec::soft(
            "coverage-avail-except-1",
            4,
            Availability::new(Group::FloorCoverage, FLOOR, 1),
        ),
        ConstraintSpec::soft(
            "coverage-avail-except-2",
            8,
            Availability::new(Group::FloorCoverage, FLOOR, 2),
        ),
        ConstraintSpec::soft(
            "coverage-avail-except-3",
            12,
            Availability::new(Group::FloorCoverage, FLOOR, 3),
        ),
        ConstraintSpec::soft(
            "coverage-avail-except-4",
            20,
            Availability::new(Group::FloorCoverage, FLOOR, 4),
        ),
        ConstraintSpec::soft(
            "coverage-diff-break",
            4,
            SubgroupBreakroom(Group::FloorCoverage),
        ),
        ConstraintSpec::soft("coverage-no-reg-if-alone", 4, CoverageNoRegisterIfAlone),
        ConstraintSpec::soft("no-reg-first-thing", 4, NoRegisterFirstThing),
        ConstraintSpec::soft("register-max-4-in-16", 4, RegisterInSpan { cap: 4, span: 16 }),
        ConstraintSpec::soft("register-max-6-in-16", 99, RegisterInSpan { cap: 6, span: 16 }),
    ]
}

fn non_designated_outside_coverage(roster: &Roster) -> Vec<EmployeeId> {
    roster.ids_where(|e| !e.capabilities.designated_cashier && !e.capabilities.floor_coverage)
}

/// Orders cashier runs and break times between comparable employees so
/// that equivalent schedules collapse onto one layout.
///
/// Before noon and after 6:00, an earlier employee's cashier slots come
/// before a later employee's. Employees on identical shifts take lunch in
/// roster order, and breaks too when their lunches coincide.
#[derive(Debug, Clone, Copy)]
pub struct Aesthetics;

impl Rule for Aesthetics {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let hours = roster.hours();
        let noon = hours.slot_at_hour(12).unwrap_or(0);
        let six = hours.slot_at_hour(18).unwrap_or(roster.num_slots());
        let windows = [0..noon, six..roster.num_slots()];
        let ids = non_designated_outside_coverage(roster);

        let mut count = 0;
        for (i, &e1) in ids.iter().enumerate() {
            for &e2 in &ids[i + 1..] {
                for window in &windows {
                    let first: Vec<usize> = window
                        .clone()
                        .filter(|&s| grid.get(e1, s) == Duty::Cashier)
                        .collect();
                    for s2 in window.clone().filter(|&s| grid.get(e2, s) == Duty::Cashier) {
                        count += first.iter().filter(|&&s1| s1 >= s2).count() as u64;
                    }
                }

                if roster.employee(e1).shift.window() != roster.employee(e2).shift.window() {
                    continue;
                }
                let (Some(m1), Some(m2)) = (Landmarks::of(grid, e1), Landmarks::of(grid, e2)) else {
                    continue;
                };
                if m1.lunch > m2.lunch {
                    count += 1;
                } else if m1.lunch == m2.lunch {
                    count += u64::from(m1.break1 > m2.break1) + u64::from(m1.break2 > m2.break2);
                }
            }
        }
        count
    }
}

/// Caps how many employees hold the given duties during any slot.
#[derive(Debug, Clone, Copy)]
pub struct SimultaneousCap {
    duties: &'static [Duty],
    cap: usize,
    max_staff: Option<usize>,
}

impl SimultaneousCap {
    pub fn new(duties: &'static [Duty], cap: usize) -> Self {
        Self {
            duties,
            cap,
            max_staff: None,
        }
    }

    /// Applies the cap only on days with at most `staff` employees.
    pub fn up_to_staff(mut self, staff: usize) -> Self {
        self.max_staff = Some(staff);
        self
    }
}

impl Rule for SimultaneousCap {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        if self.max_staff.is_some_and(|max| roster.len() > max) {
            return 0;
        }
        roster
            .day()
            .map(|slot| {
                let n = grid.column(slot).filter(|d| self.duties.contains(d)).count();
                n.saturating_sub(self.cap) as u64
            })
            .sum()
    }
}

/// Keeps breaks away from the start and end of each shift.
///
/// No break in the first `start_gap - 1` slots or the last `end_gap`
/// slots of the shift.
#[derive(Debug, Clone, Copy)]
pub struct BreakBoundGap {
    start_gap: usize,
    end_gap: usize,
}

impl BreakBoundGap {
    pub fn new(start_gap: usize, end_gap: usize) -> Self {
        Self { start_gap, end_gap }
    }
}

impl Rule for BreakBoundGap {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let mut count = 0;
        for (id, e) in roster.employees().iter().enumerate() {
            let start = e.shift.start();
            let stop = e.shift.stop();
            let head = start..(start + self.start_gap).saturating_sub(1).min(stop);
            let tail = stop.saturating_sub(self.end_gap).max(start)..stop;
            count += head
                .chain(tail)
                .filter(|&s| grid.get(id, s) == Duty::Break)
                .count() as u64;
        }
        count
    }
}

/// Breaks and lunch edges stay more than `gap` slots apart.
#[derive(Debug, Clone, Copy)]
pub struct BreakLunchGap {
    pub gap: i64,
}

impl Rule for BreakLunchGap {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let last_offset = roster.lunch_len() as i64 - 1;
        roster
            .employee_ids()
            .filter_map(|id| Landmarks::of(grid, id))
            .map(|m| {
                let b1 = m.break1 as i64;
                let b2 = m.break2 as i64;
                let l = m.lunch as i64;
                let le = l + last_offset;
                [b1 - b2, b1 - l, b2 - l, b1 - le, b2 - le]
                    .iter()
                    .filter(|d| d.abs() <= self.gap)
                    .count() as u64
            })
            .sum()
    }
}

/// At most one member of the group in the breakroom at a time.
#[derive(Debug, Clone, Copy)]
pub struct SubgroupBreakroom(pub Group);

impl Rule for SubgroupBreakroom {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let members = self.0.members(roster);
        roster
            .day()
            .map(|slot| {
                let away = members
                    .iter()
                    .filter(|&&id| grid.get(id, slot).is_breakroom())
                    .count();
                away.saturating_sub(1) as u64
            })
            .sum()
    }
}

/// When a group has several members, one of them holds one of `duties`
/// throughout the group's combined hours, allowing `exceptions` gaps.
#[derive(Debug, Clone, Copy)]
pub struct Availability {
    group: Group,
    duties: &'static [Duty],
    exceptions: usize,
}

impl Availability {
    pub fn new(group: Group, duties: &'static [Duty], exceptions: usize) -> Self {
        Self {
            group,
            duties,
            exceptions,
        }
    }
}

impl Rule for Availability {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let members = self.group.members(roster);
        if members.len() < 2 {
            return 0;
        }
        let shifts = members.iter().map(|&id| &roster.employee(id).shift);
        let from = shifts.clone().map(|s| s.start()).min().unwrap_or(0);
        let to = shifts.map(|s| s.stop()).max().unwrap_or(0);
        let gaps = (from..to)
            .filter(|&slot| {
                !members
                    .iter()
                    .any(|&id| self.duties.contains(&grid.get(id, slot)))
            })
            .count();
        gaps.saturating_sub(self.exceptions) as u64
    }
}

/// Lunch counts at 12 and 1, and at 2 and 3, differ by at most one.
#[derive(Debug, Clone, Copy)]
pub struct LunchBalance;

impl Rule for LunchBalance {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let hours = roster.hours();
        let lunches_at = |hour| {
            hours
                .slot_at_hour(hour)
                .map_or(0, |slot| grid.count_at(slot, Duty::Lunch))
        };
        [(12, 13), (14, 15)]
            .iter()
            .map(|&(a, b)| lunches_at(a).abs_diff(lunches_at(b)).saturating_sub(1) as u64)
            .sum()
    }
}

/// Employees with a higher lunch priority never eat after lower ones.
#[derive(Debug, Clone, Copy)]
pub struct LunchFairOrder;

impl Rule for LunchFairOrder {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let hours = roster.hours();
        let lunches: Vec<(u8, Option<usize>)> = roster
            .employees()
            .iter()
            .enumerate()
            .map(|(id, e)| (e.shift.lunch_priority(hours), first_slot(grid, id, Duty::Lunch)))
            .collect();
        let mut count = 0;
        for (p1, l1) in &lunches {
            for (p2, l2) in &lunches {
                if let (true, Some(l1), Some(l2)) = (p1 > p2, l1, l2) {
                    count += u64::from(l1 > l2);
                }
            }
        }
        count
    }
}

/// Lunch starts within the shift's strict lunch window.
#[derive(Debug, Clone, Copy)]
pub struct LunchStrictBounds;

impl Rule for LunchStrictBounds {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let hours = roster.hours();
        roster
            .employees()
            .iter()
            .enumerate()
            .filter(|(id, e)| {
                let starts = e
                    .shift
                    .strict_lunch_hours(hours)
                    .iter()
                    .filter_map(|&h| hours.slot_at_hour(h))
                    .filter(|&slot| grid.get(*id, slot) == Duty::Lunch)
                    .count();
                starts != 1
            })
            .count() as u64
    }
}

/// A lone floor-coverage employee stays off the registers.
#[derive(Debug, Clone, Copy)]
pub struct CoverageNoRegisterIfAlone;

impl Rule for CoverageNoRegisterIfAlone {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        roster.sole_floor_coverage().map_or(0, |id| {
            grid.row(id).iter().filter(|d| d.is_register()).count() as u64
        })
    }
}

/// Regular employees who start after opening do not begin on a register.
#[derive(Debug, Clone, Copy)]
pub struct NoRegisterFirstThing;

impl Rule for NoRegisterFirstThing {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        roster
            .employees()
            .iter()
            .enumerate()
            .filter(|(id, e)| {
                !e.is_designated_cashier()
                    && e.shift.start() != 0
                    && grid.get(*id, e.shift.start()).is_register()
            })
            .count() as u64
    }
}

/// Caps register slots of regular employees within any `span` window.
#[derive(Debug, Clone, Copy)]
pub struct RegisterInSpan {
    pub cap: usize,
    pub span: usize,
}

impl Rule for RegisterInSpan {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let mut count = 0;
        for id in roster.non_designated() {
            let shift = &roster.employee(id).shift;
            let row = grid.row(id);
            for base in shift.window() {
                let end = shift.stop().min(base + self.span);
                let n = row[base..end].iter().filter(|d| d.is_register()).count();
                count += n.saturating_sub(self.cap) as u64;
            }
        }
        count
    }
}

#[cfg(test)]
#[path = "soft_tests.rs"]
mod tests;
