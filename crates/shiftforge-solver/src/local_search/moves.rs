//! Grid moves and their random sampling.

use rand::Rng;
use shiftforge_core::{Assignment, Duty, EmployeeId, Roster};

/// Duties a change move may write.
const FLOOR_DUTIES: [Duty; 3] = [Duty::Other, Duty::Cashier, Duty::Support];

/// Tries per sample before giving up on a move kind.
const SAMPLE_TRIES: usize = 8;

/// A local change to a duty grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMove {
    /// Writes a floor duty into one cell.
    Change {
        employee: EmployeeId,
        slot: usize,
        duty: Duty,
    },
    /// Exchanges two cells of one employee.
    SwapSlots {
        employee: EmployeeId,
        a: usize,
        b: usize,
    },
    /// Exchanges the duties of two employees in one slot.
    SwapEmployees {
        a: EmployeeId,
        b: EmployeeId,
        slot: usize,
    },
    /// Moves an employee's lunch hour to another start.
    MoveLunch { employee: EmployeeId, start: usize },
}

impl GridMove {
    /// Returns true if applying the move changes the grid and keeps
    /// shift windows, meetings and lunch runs intact.
    pub fn is_doable(&self, roster: &Roster, grid: &Assignment) -> bool {
        match *self {
            GridMove::Change {
                employee,
                slot,
                duty,
            } => {
                let current = grid.get(employee, slot);
                FLOOR_DUTIES.contains(&current) && current != duty
            }
            GridMove::SwapSlots { employee, a, b } => {
                let (da, db) = (grid.get(employee, a), grid.get(employee, b));
                da != db && swappable(da) && swappable(db)
            }
            GridMove::SwapEmployees { a, b, slot } => {
                let (da, db) = (grid.get(a, slot), grid.get(b, slot));
                a != b && da != db && swappable(da) && swappable(db)
            }
            GridMove::MoveLunch { employee, start } => {
                let len = roster.lunch_len();
                let current = grid.runs(employee, Duty::Lunch);
                let already = current.first().map(|run| run.start) == Some(start);
                !already
                    && start + len <= grid.num_slots()
                    && (start..start + len).all(|slot| {
                        let duty = grid.get(employee, slot);
                        duty == Duty::Lunch || FLOOR_DUTIES.contains(&duty)
                    })
            }
        }
    }

    /// Applies the move in place.
    pub fn apply(&self, roster: &Roster, grid: &mut Assignment) {
        match *self {
            GridMove::Change {
                employee,
                slot,
                duty,
            } => grid.set(employee, slot, duty),
            GridMove::SwapSlots { employee, a, b } => {
                let da = grid.get(employee, a);
                grid.set(employee, a, grid.get(employee, b));
                grid.set(employee, b, da);
            }
            GridMove::SwapEmployees { a, b, slot } => {
                let da = grid.get(a, slot);
                grid.set(a, slot, grid.get(b, slot));
                grid.set(b, slot, da);
            }
            GridMove::MoveLunch { employee, start } => {
                for slot in grid.slots_with(employee, Duty::Lunch) {
                    grid.set(employee, slot, Duty::Other);
                }
                grid.fill(employee, start..start + roster.lunch_len(), Duty::Lunch);
            }
        }
    }
}

/// Cells that swap moves may exchange. Lunch moves only as a whole hour.
fn swappable(duty: Duty) -> bool {
    !matches!(duty, Duty::Unassigned | Duty::Meeting | Duty::Lunch)
}

/// Samples doable moves for one roster.
#[derive(Debug, Clone)]
pub struct MoveSampler {
    /// Per employee, the slots on shift and outside meetings.
    movable: Vec<Vec<usize>>,
    /// Per employee, the valid lunch starts.
    lunch_starts: Vec<Vec<usize>>,
    /// Employees that may take any floor duty.
    floor_staff: Vec<EmployeeId>,
}

impl MoveSampler {
    pub fn new(roster: &Roster) -> Self {
        let movable = roster
            .employees()
            .iter()
            .map(|e| e.shift.window().filter(|&s| !e.in_meeting(s)).collect())
            .collect();
        let lunch_starts = roster
            .employee_ids()
            .map(|id| roster.valid_lunch_starts(id))
            .collect();
        Self {
            movable,
            lunch_starts,
            floor_staff: roster.non_designated(),
        }
    }

    /// Samples one doable move, or `None` if the sampled kind found none.
    pub fn sample<R: Rng>(
        &self,
        roster: &Roster,
        grid: &Assignment,
        rng: &mut R,
    ) -> Option<GridMove> {
        let pick = rng.random_range(0..20);
        for _ in 0..SAMPLE_TRIES {
            let candidate = match pick {
                0..=7 => self.change(rng),
                8..=12 => self.swap_slots(rng),
                13..=17 => self.swap_employees(grid, rng),
                _ => self.move_lunch(rng),
            };
            if let Some(m) = candidate.filter(|m| m.is_doable(roster, grid)) {
                return Some(m);
            }
        }
        None
    }

    fn change<R: Rng>(&self, rng: &mut R) -> Option<GridMove> {
        let employee = *pick(&self.floor_staff, rng)?;
        let slot = *pick(&self.movable[employee], rng)?;
        let duty = *pick(&FLOOR_DUTIES, rng)?;
        Some(GridMove::Change {
            employee,
            slot,
            duty,
        })
    }

    fn swap_slots<R: Rng>(&self, rng: &mut R) -> Option<GridMove> {
        let employee = rng.random_range(0..self.movable.len().max(1));
        let slots = self.movable.get(employee)?;
        Some(GridMove::SwapSlots {
            employee,
            a: *pick(slots, rng)?,
            b: *pick(slots, rng)?,
        })
    }

    fn swap_employees<R: Rng>(&self, grid: &Assignment, rng: &mut R) -> Option<GridMove> {
        let slot = rng.random_range(0..grid.num_slots().max(1));
        let here: Vec<EmployeeId> = (0..grid.num_employees())
            .filter(|&e| swappable(grid.get(e, slot)))
            .collect();
        Some(GridMove::SwapEmployees {
            a: *pick(&here, rng)?,
            b: *pick(&here, rng)?,
            slot,
        })
    }

    fn move_lunch<R: Rng>(&self, rng: &mut R) -> Option<GridMove> {
        let employee = rng.random_range(0..self.lunch_starts.len().max(1));
        let start = *pick(self.lunch_starts.get(employee)?, rng)?;
        Some(GridMove::MoveLunch { employee, start })
    }
}

fn pick<'a, T, R: Rng>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.random_range(0..items.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use shiftforge_test::{pair_grid, pair_roster};

    #[test]
    fn test_change_move() {
        let roster = pair_roster();
        let mut grid = pair_grid();
        let m = GridMove::Change {
            employee: 0,
            slot: 20,
            duty: Duty::Support,
        };
        assert!(m.is_doable(&roster, &grid));
        m.apply(&roster, &mut grid);
        assert_eq!(grid.get(0, 20), Duty::Support);

        let on_lunch = GridMove::Change {
            employee: 0,
            slot: 8,
            duty: Duty::Other,
        };
        assert!(!on_lunch.is_doable(&roster, &grid));
    }

    #[test]
    fn test_swaps_skip_lunch_and_off_shift() {
        let roster = pair_roster();
        let grid = pair_grid();
        let into_lunch = GridMove::SwapSlots {
            employee: 0,
            a: 0,
            b: 8,
        };
        assert!(!into_lunch.is_doable(&roster, &grid));

        let off_shift = GridMove::SwapEmployees { a: 0, b: 1, slot: 0 };
        assert!(!off_shift.is_doable(&roster, &grid));

        let mut swapped = grid.clone();
        let both_here = GridMove::SwapEmployees { a: 0, b: 1, slot: 20 };
        assert!(both_here.is_doable(&roster, &swapped));
        both_here.apply(&roster, &mut swapped);
        assert_eq!(swapped.get(0, 20), Duty::Cashier);
        assert_eq!(swapped.get(1, 20), Duty::Other);
        assert_eq!(swapped.distance(&grid), 2);
    }

    #[test]
    fn test_move_lunch() {
        let roster = pair_roster();
        let mut grid = pair_grid();
        // Avery eats at 12:00; move to 2:00 (slot 16), which is all cashier.
        let m = GridMove::MoveLunch {
            employee: 0,
            start: 16,
        };
        assert!(m.is_doable(&roster, &grid));
        m.apply(&roster, &mut grid);
        assert_eq!(grid.runs(0, Duty::Lunch), vec![16..20]);
        assert_eq!(grid.get(0, 8), Duty::Other);

        let same = GridMove::MoveLunch {
            employee: 0,
            start: 16,
        };
        assert!(!same.is_doable(&roster, &grid));
    }

    #[test]
    fn test_sampled_moves_are_doable() {
        let roster = pair_roster();
        let grid = pair_grid();
        let sampler = MoveSampler::new(&roster);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut sampled = 0;
        for _ in 0..200 {
            if let Some(m) = sampler.sample(&roster, &grid, &mut rng) {
                assert!(m.is_doable(&roster, &grid));
                sampled += 1;
            }
        }
        assert!(sampled > 100);
    }
}
