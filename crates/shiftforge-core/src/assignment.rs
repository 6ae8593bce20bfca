//! The duty grid: one duty per (employee, slot) cell.

use serde::{Deserialize, Serialize};

use crate::duty::Duty;
use crate::employee::EmployeeId;
use crate::time::SlotRange;

/// A complete grid of duties, stored row-major by employee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    num_employees: usize,
    num_slots: usize,
    cells: Vec<Duty>,
}

impl Assignment {
    /// Creates a grid with every cell unassigned.
    pub fn new(num_employees: usize, num_slots: usize) -> Self {
        Self {
            num_employees,
            num_slots,
            cells: vec![Duty::Unassigned; num_employees * num_slots],
        }
    }

    /// Builds a grid from per-employee rows. Returns `None` if the rows
    /// differ in length.
    pub fn from_rows(rows: Vec<Vec<Duty>>) -> Option<Self> {
        let num_slots = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != num_slots) {
            return None;
        }
        Some(Self {
            num_employees: rows.len(),
            num_slots,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn num_employees(&self) -> usize {
        self.num_employees
    }

    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    #[inline]
    pub fn get(&self, employee: EmployeeId, slot: usize) -> Duty {
        self.cells[employee * self.num_slots + slot]
    }

    #[inline]
    pub fn set(&mut self, employee: EmployeeId, slot: usize, duty: Duty) {
        self.cells[employee * self.num_slots + slot] = duty;
    }

    /// Sets every cell of the range to the same duty.
    pub fn fill(&mut self, employee: EmployeeId, range: SlotRange, duty: Duty) {
        for slot in range {
            self.set(employee, slot, duty);
        }
    }

    pub fn row(&self, employee: EmployeeId) -> &[Duty] {
        let start = employee * self.num_slots;
        &self.cells[start..start + self.num_slots]
    }

    /// Iterates the duties of every employee during one slot.
    pub fn column(&self, slot: usize) -> impl Iterator<Item = Duty> + '_ {
        (0..self.num_employees).map(move |e| self.get(e, slot))
    }

    pub fn count_at(&self, slot: usize, duty: Duty) -> usize {
        self.column(slot).filter(|d| *d == duty).count()
    }

    /// Number of employees on Cashier or Support during the slot.
    pub fn register_at(&self, slot: usize) -> usize {
        self.column(slot).filter(|d| d.is_register()).count()
    }

    /// Number of employees on Break or Lunch during the slot.
    pub fn breakroom_at(&self, slot: usize) -> usize {
        self.column(slot).filter(|d| d.is_breakroom()).count()
    }

    pub fn count_in_row(&self, employee: EmployeeId, duty: Duty) -> usize {
        self.row(employee).iter().filter(|d| **d == duty).count()
    }

    pub fn slots_with(&self, employee: EmployeeId, duty: Duty) -> Vec<usize> {
        self.row(employee)
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == duty)
            .map(|(s, _)| s)
            .collect()
    }

    /// Maximal contiguous runs of the duty in the employee's row.
    pub fn runs(&self, employee: EmployeeId, duty: Duty) -> Vec<SlotRange> {
        let mut runs = Vec::new();
        let mut start = None;
        for (slot, d) in self.row(employee).iter().enumerate() {
            match (start, *d == duty) {
                (None, true) => start = Some(slot),
                (Some(s), false) => {
                    runs.push(s..slot);
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push(s..self.num_slots);
        }
        runs
    }

    /// Number of cells that differ from another grid of the same shape.
    pub fn distance(&self, other: &Assignment) -> usize {
        self.cells
            .iter()
            .zip(&other.cells)
            .filter(|(a, b)| a != b)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_runs() {
        let mut grid = Assignment::new(2, 8);
        grid.fill(0, 0..8, Duty::Other);
        grid.fill(0, 2..4, Duty::Lunch);
        grid.set(0, 6, Duty::Break);
        grid.fill(1, 0..8, Duty::Cashier);
        grid.set(1, 2, Duty::Break);

        assert_eq!(grid.register_at(0), 1);
        assert_eq!(grid.breakroom_at(2), 2);
        assert_eq!(grid.count_in_row(1, Duty::Cashier), 7);
        assert_eq!(grid.runs(0, Duty::Other), vec![0..2, 4..6, 7..8]);
        assert_eq!(grid.runs(1, Duty::Cashier), vec![0..2, 3..8]);
        assert_eq!(grid.slots_with(0, Duty::Break), vec![6]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Assignment::from_rows(vec![vec![Duty::Other; 3], vec![Duty::Other; 2]]).is_none());
        let grid = Assignment::from_rows(vec![vec![Duty::Other; 3]; 2]).unwrap();
        assert_eq!(grid.num_employees(), 2);
        assert_eq!(grid.column(1).count(), 2);
    }

    #[test]
    fn test_distance() {
        let a = Assignment::new(1, 4);
        let mut b = a.clone();
        b.set(0, 3, Duty::Break);
        assert_eq!(a.distance(&b), 1);
    }
}
