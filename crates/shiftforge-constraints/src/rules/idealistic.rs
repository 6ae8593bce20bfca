//! Idealistic penalties, minimized only once a valid schedule exists.

use shiftforge_core::{Assignment, BreakLunchOrder, Duty, Roster};

use super::{hour_of, Landmarks};
use crate::spec::{ConstraintSpec, Rule};

/// The standard idealistic tier.
pub fn idealistic_rules() -> Vec<ConstraintSpec> {
    vec![
        ConstraintSpec::idealistic("distribute-breaks-lunches", DistributeBreaksLunches),
        ConstraintSpec::idealistic("register-in-groups", RegisterInGroups),
        ConstraintSpec::idealistic("breakroom-under-five", BreakroomUnder { limit: 5 }),
    ]
}

/// Spreads breaks and lunch evenly across each shift.
///
/// The shift is cut into stretches of work by the two breaks and lunch.
/// Every pair of stretches that differ by more than one slot adds the
/// excess to the penalty.
#[derive(Debug, Clone, Copy)]
pub struct DistributeBreaksLunches;

impl Rule for DistributeBreaksLunches {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let hours = roster.hours();
        let last_offset = roster.lunch_len() as i64 - 1;
        let mut penalty = 0;
        for (id, e) in roster.employees().iter().enumerate() {
            let Some(m) = Landmarks::of(grid, id) else {
                continue;
            };
            let start = e.shift.start() as i64;
            let stop = e.shift.stop() as i64;
            let b1 = m.break1 as i64;
            let b2 = m.break2 as i64;
            let l = m.lunch as i64;
            let le = l + last_offset;

            let stretches: Vec<i64> = match e.shift.break_lunch_order(hour_of(roster, m.lunch), hours) {
                BreakLunchOrder::LunchFirst => {
                    let (a, b, c) = (b1 - le, b2 - b1, stop - b2);
                    vec![b - a, c - a, c - b]
                }
                BreakLunchOrder::LunchBetween => vec![
                    (l - b1) - (b1 - (start - 1)),
                    (stop - b2) - (b2 - le),
                ],
                BreakLunchOrder::LunchLast => {
                    let (a, b, c) = (b1 - (start - 1), b2 - b1, l - b2);
                    vec![b - a, c - a, c - b]
                }
            };
            penalty += stretches
                .iter()
                .map(|d| (d.unsigned_abs()).saturating_sub(1))
                .sum::<u64>();
        }
        penalty
    }
}

/// Penalizes isolated register slots of regular employees.
///
/// A Cashier or Support slot with no neighbour of the same duty counts,
/// unless it is the employee's only slot of that duty.
#[derive(Debug, Clone, Copy)]
pub struct RegisterInGroups;

impl Rule for RegisterInGroups {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let n = roster.num_slots();
        let mut penalty = 0;
        for id in roster.non_designated() {
            let row = grid.row(id);
            for duty in [Duty::Support, Duty::Cashier] {
                if grid.count_in_row(id, duty) == 1 {
                    continue;
                }
                penalty += (0..n)
                    .filter(|&slot| {
                        row[slot] == duty
                            && (slot == 0 || row[slot - 1] != duty)
                            && (slot + 1 == n || row[slot + 1] != duty)
                    })
                    .count() as u64;
            }
        }
        penalty
    }
}

/// Counts slots where `limit` or more people share the breakroom.
#[derive(Debug, Clone, Copy)]
pub struct BreakroomUnder {
    pub limit: usize,
}

impl Rule for BreakroomUnder {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        roster
            .day()
            .filter(|&slot| grid.breakroom_at(slot) >= self.limit)
            .count() as u64
    }
}
