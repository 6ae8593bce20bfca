//! The day's roster: who works, when, and how many registers must be open.
//!
//! A `Roster` is loaded once per run and never mutated afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::employee::{Employee, EmployeeId};
use crate::error::{Result, ShiftforgeError};
use crate::shift::LUNCH_START_HOURS;
use crate::time::{SlotRange, StoreHours};

/// Desired number of open registers from `start` until the next target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterTarget {
    pub count: usize,
    pub start: usize,
}

/// Immutable input of one planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    hours: StoreHours,
    employees: Vec<Employee>,
    register_targets: Vec<RegisterTarget>,
}

impl Roster {
    /// Creates and validates a roster.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when names repeat, when a shift or
    /// meeting falls outside the day, when register targets do not start at
    /// opening, or when fewer registers are requested than designated
    /// cashiers are on shift.
    pub fn new(
        hours: StoreHours,
        employees: Vec<Employee>,
        mut register_targets: Vec<RegisterTarget>,
    ) -> Result<Self> {
        hours.validate()?;
        register_targets.sort_by_key(|t| t.start);
        let roster = Self {
            hours,
            employees,
            register_targets,
        };
        roster.validate()?;
        Ok(roster)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for e in &self.employees {
            if !seen.insert(e.name.as_str()) {
                return Err(ShiftforgeError::Config(format!(
                    "name \"{}\" is not unique",
                    e.name
                )));
            }
            if e.shift.is_empty() || e.shift.stop() > self.hours.num_slots() {
                return Err(ShiftforgeError::Config(format!(
                    "shift of {} lies outside store hours",
                    e.name
                )));
            }
            for meeting in &e.meetings {
                if meeting.is_empty()
                    || meeting.start < e.shift.start()
                    || meeting.end > e.shift.stop()
                {
                    return Err(ShiftforgeError::Config(format!(
                        "meeting {}-{} of {} lies outside their shift",
                        self.hours.slot_to_time(meeting.start),
                        self.hours.slot_to_time(meeting.end),
                        e.name
                    )));
                }
            }
        }

        match self.register_targets.first() {
            Some(first) if first.start == 0 => {}
            _ => {
                return Err(ShiftforgeError::Config(format!(
                    "register targets must start at opening ({})",
                    self.hours.slot_to_time(0)
                )))
            }
        }

        for slot in self.hours.day() {
            let target = self.register_target(slot);
            let designated = self.designated_cashiers_here(slot);
            if target < designated {
                return Err(ShiftforgeError::Config(format!(
                    "register target needs updating: at {}, register count is {} but there are {} designated cashiers",
                    self.hours.slot_to_time(slot),
                    target,
                    designated
                )));
            }
        }
        Ok(())
    }

    pub fn hours(&self) -> &StoreHours {
        &self.hours
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: EmployeeId) -> &Employee {
        &self.employees[id]
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn num_slots(&self) -> usize {
        self.hours.num_slots()
    }

    pub fn day(&self) -> SlotRange {
        self.hours.day()
    }

    pub fn register_targets(&self) -> &[RegisterTarget] {
        &self.register_targets
    }

    pub fn employee_ids(&self) -> std::ops::Range<EmployeeId> {
        0..self.employees.len()
    }

    /// Ids of employees matching the predicate, in roster order.
    pub fn ids_where(&self, pred: impl Fn(&Employee) -> bool) -> Vec<EmployeeId> {
        self.employees
            .iter()
            .enumerate()
            .filter(|(_, e)| pred(e))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<EmployeeId> {
        self.employees.iter().position(|e| e.name == name)
    }

    pub fn designated_cashiers(&self) -> Vec<EmployeeId> {
        self.ids_where(|e| e.capabilities.designated_cashier)
    }

    pub fn non_designated(&self) -> Vec<EmployeeId> {
        self.ids_where(|e| !e.capabilities.designated_cashier)
    }

    pub fn full_timers(&self) -> Vec<EmployeeId> {
        self.ids_where(|e| e.is_full_time())
    }

    pub fn floor_coverage(&self) -> Vec<EmployeeId> {
        self.ids_where(|e| e.capabilities.floor_coverage)
    }

    /// The floor-coverage employee when they are the only one today.
    pub fn sole_floor_coverage(&self) -> Option<EmployeeId> {
        match self.floor_coverage().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Employees compared by the imbalance constraints: everyone except
    /// designated cashiers and a lone floor-coverage employee.
    pub fn imbalance_pool(&self) -> Vec<EmployeeId> {
        let sole = self.sole_floor_coverage();
        self.ids_where(|e| !e.capabilities.designated_cashier)
            .into_iter()
            .filter(|id| Some(*id) != sole)
            .collect()
    }

    /// Desired number of Cashier-or-Support duties during the slot.
    pub fn register_target(&self, slot: usize) -> usize {
        self.register_targets
            .iter()
            .take_while(|t| t.start <= slot)
            .last()
            .map(|t| t.count)
            .unwrap_or(0)
    }

    pub fn designated_cashiers_here(&self, slot: usize) -> usize {
        self.employees
            .iter()
            .filter(|e| e.capabilities.designated_cashier && e.is_here(slot))
            .count()
    }

    /// Employees on shift and free of meetings during the slot.
    pub fn free_at(&self, slot: usize) -> usize {
        self.employees.iter().filter(|e| e.is_free(slot)).count()
    }

    /// Slots at which a lunch may start.
    pub fn lunch_starts(&self) -> Vec<usize> {
        LUNCH_START_HOURS
            .iter()
            .filter_map(|h| self.hours.slot_at_hour(*h))
            .collect()
    }

    /// Number of slots in a lunch.
    pub fn lunch_len(&self) -> usize {
        self.hours.slots_per_hour()
    }

    /// Lunch starts that fit the employee's shift: the whole hour on shift,
    /// not at the very start of the shift, and clear of meetings.
    pub fn valid_lunch_starts(&self, id: EmployeeId) -> Vec<usize> {
        let e = &self.employees[id];
        let len = self.lunch_len();
        self.lunch_starts()
            .into_iter()
            .filter(|&start| {
                start != e.shift.start()
                    && (start..start + len).all(|slot| e.is_free(slot))
            })
            .collect()
    }
}
