//! Greedy construction of a starting grid.
//!
//! Lays out shifts and meetings, then lunches, then breaks, then staffs
//! the registers slot by slot. The result usually satisfies most hard
//! rules; local search repairs the rest.

use std::cmp::Reverse;

use shiftforge_core::{Assignment, BreakLunchOrder, Duty, EmployeeId, Roster};

/// Longest register run the constructor keeps extending.
const MAX_REGISTER_RUN: usize = 4;

/// Builds a starting grid for the roster.
pub fn construct(roster: &Roster) -> Assignment {
    let mut grid = Assignment::new(roster.len(), roster.num_slots());
    for (id, e) in roster.employees().iter().enumerate() {
        for slot in e.shift.window() {
            let duty = if e.in_meeting(slot) {
                Duty::Meeting
            } else {
                Duty::Other
            };
            grid.set(id, slot, duty);
        }
    }
    place_lunches(roster, &mut grid);
    place_breaks(roster, &mut grid);
    staff_registers(roster, &mut grid);
    grid
}

/// Employees on the floor at a slot, beyond what the registers need.
fn slack(roster: &Roster, grid: &Assignment, slot: usize) -> i64 {
    grid.count_at(slot, Duty::Other) as i64 - roster.register_target(slot) as i64
}

fn place_lunches(roster: &Roster, grid: &mut Assignment) {
    let hours = roster.hours();
    let len = roster.lunch_len();
    let mut order: Vec<EmployeeId> = roster.employee_ids().collect();
    order.sort_by_key(|&id| Reverse(roster.employee(id).shift.lunch_priority(hours)));

    for id in order {
        let shift = &roster.employee(id).shift;
        let strict = shift.strict_lunch_hours(hours);
        let best = roster.valid_lunch_starts(id).into_iter().min_by_key(|&start| {
            let hour = hours.open_hour + (start / hours.slots_per_hour()) as u32;
            let eating = (start..start + len)
                .map(|s| grid.count_at(s, Duty::Lunch))
                .max()
                .unwrap_or(0);
            let tight = (start..start + len)
                .map(|s| slack(roster, grid, s))
                .min()
                .unwrap_or(0);
            (!strict.contains(&hour), eating, Reverse(tight), start)
        });
        if let Some(start) = best {
            grid.fill(id, start..start + len, Duty::Lunch);
        }
    }
}

fn place_breaks(roster: &Roster, grid: &mut Assignment) {
    let hours = roster.hours();
    let len = roster.lunch_len();
    for (id, e) in roster.employees().iter().enumerate() {
        let Some(lunch) = grid.row(id).iter().position(|d| *d == Duty::Lunch) else {
            continue;
        };
        let hour = hours.open_hour + (lunch / hours.slots_per_hour()) as u32;
        let (first, last) = (e.shift.start() + 1, e.shift.stop());
        let after = lunch + len;
        let (seg1, seg2) = match e.shift.break_lunch_order(hour, hours) {
            BreakLunchOrder::LunchFirst => {
                let third = (last.saturating_sub(after)) / 3;
                ((after, after + third.max(1) * 2), (after + third.max(1) * 2, last))
            }
            BreakLunchOrder::LunchBetween => ((first, lunch), (after, last)),
            BreakLunchOrder::LunchLast => {
                let mid = first + lunch.saturating_sub(first) / 2;
                ((first, mid), (mid, lunch))
            }
        };
        if let Some(b1) = pick_break(roster, grid, id, seg1) {
            grid.set(id, b1, Duty::Break);
            let seg2 = (seg2.0.max(b1 + 1), seg2.1);
            if let Some(b2) = pick_break(roster, grid, id, seg2) {
                grid.set(id, b2, Duty::Break);
            }
        }
    }
}

/// Picks a floor slot near the middle of `lo..hi` that leaves enough
/// staff for the registers.
fn pick_break(
    roster: &Roster,
    grid: &Assignment,
    id: EmployeeId,
    (lo, hi): (usize, usize),
) -> Option<usize> {
    let target = lo + hi.saturating_sub(lo) / 2;
    (lo..hi)
        .filter(|&slot| grid.get(id, slot) == Duty::Other)
        .min_by_key(|&slot| {
            let covered = slack(roster, grid, slot) > 0;
            (!covered, grid.breakroom_at(slot), slot.abs_diff(target))
        })
}

fn staff_registers(roster: &Roster, grid: &mut Assignment) {
    let designated = roster.designated_cashiers();
    let sole = roster.sole_floor_coverage();
    let mut counts = vec![0usize; roster.len()];
    let mut runs = vec![0usize; roster.len()];
    let mut last_cashier: Option<EmployeeId> = None;

    for slot in roster.day() {
        for &id in &designated {
            if grid.get(id, slot) == Duty::Other {
                grid.set(id, slot, Duty::Cashier);
            }
        }
        let target = roster.register_target(slot);
        let mut filled = grid.register_at(slot);

        let mut candidates: Vec<EmployeeId> = roster
            .non_designated()
            .into_iter()
            .filter(|&id| grid.get(id, slot) == Duty::Other)
            .collect();
        candidates.sort_by_key(|&id| {
            let continuing = runs[id] > 0 && runs[id] < MAX_REGISTER_RUN;
            (!continuing, Some(id) == sole, counts[id], id)
        });

        let mut cashier = None;
        if grid.count_at(slot, Duty::Cashier) == 0 {
            let keep = last_cashier
                .filter(|id| candidates.contains(id) && runs[*id] < MAX_REGISTER_RUN);
            cashier = keep.or_else(|| candidates.first().copied());
            if let Some(id) = cashier {
                grid.set(id, slot, Duty::Cashier);
                filled += 1;
            }
        }
        for &id in candidates.iter().filter(|&&id| Some(id) != cashier) {
            if filled >= target {
                break;
            }
            grid.set(id, slot, Duty::Support);
            filled += 1;
        }

        for id in roster.employee_ids() {
            if grid.get(id, slot).is_register() {
                counts[id] += 1;
                runs[id] += 1;
            } else {
                runs[id] = 0;
            }
        }
        last_cashier = roster
            .non_designated()
            .into_iter()
            .find(|&id| grid.get(id, slot) == Duty::Cashier);
    }
}
