//! Tests for the hard tier.

use super::*;
use shiftforge_core::{Employee, RegisterTarget, Shift, ShiftKind, StoreHours};
use shiftforge_test::{pair_grid, pair_roster};

fn total(roster: &Roster, grid: &Assignment) -> Vec<(String, u64)> {
    hard_rules()
        .iter()
        .map(|spec| (spec.id().to_string(), spec.violations(roster, grid)))
        .filter(|(_, v)| *v > 0)
        .collect()
}

#[test]
fn test_valid_grid_breaks_no_hard_rule() {
    let roster = pair_roster();
    let grid = pair_grid();
    assert!(total(&roster, &grid).is_empty(), "{:?}", total(&roster, &grid));
}

#[test]
fn test_hard_rules_have_no_proof_for_feasible_roster() {
    let roster = pair_roster();
    for spec in hard_rules() {
        assert_eq!(spec.prove_infeasible(&roster), None, "{}", spec.id());
    }
}

#[test]
fn test_missing_cashier_counts_slot() {
    let roster = pair_roster();
    let mut grid = pair_grid();
    grid.set(0, 0, Duty::Support);
    assert_eq!(CashierAlways.violations(&roster, &grid), 1);
    assert_eq!(RegisterCount.violations(&roster, &grid), 0);
}

#[test]
fn test_register_count_off_by_two() {
    let roster = pair_roster();
    let mut grid = pair_grid();
    // Blake is on regular duty at 12:00; two extra register slots.
    grid.set(1, 12, Duty::Support);
    grid.set(1, 14, Duty::Support);
    assert_eq!(RegisterCount.violations(&roster, &grid), 2);
}

#[test]
fn test_second_floor_cashier() {
    let roster = pair_roster();
    let mut grid = pair_grid();
    grid.set(1, 12, Duty::Cashier);
    assert_eq!(SingleFloorCashier.violations(&roster, &grid), 1);
}

#[test]
fn test_break_count() {
    let roster = pair_roster();
    let mut grid = pair_grid();
    grid.set(0, 21, Duty::Break);
    assert_eq!(TwoBreaks.violations(&roster, &grid), 1);
}

#[test]
fn test_lunch_must_start_on_the_hour() {
    let roster = pair_roster();
    let mut grid = pair_grid();
    // Shift Avery's lunch by one slot: 9..13 instead of 8..12.
    grid.set(0, 8, Duty::Cashier);
    grid.set(0, 12, Duty::Lunch);
    assert_eq!(OneLunchHour.violations(&roster, &grid), 1);
}

#[test]
fn test_shift_window_and_meetings() {
    let roster = pair_roster();
    let mut grid = pair_grid();
    grid.set(0, 35, Duty::Other);
    grid.set(1, 30, Duty::Meeting);
    assert_eq!(ShiftWindow.violations(&roster, &grid), 1);
    assert_eq!(Meetings.violations(&roster, &grid), 1);
}

#[test]
fn test_break_lunch_order() {
    let roster = pair_roster();
    let mut grid = pair_grid();
    // Avery lunches at noon and must take both breaks afterwards.
    grid.set(0, 22, Duty::Other);
    grid.set(0, 6, Duty::Break);
    grid.set(0, 7, Duty::Other);
    assert_eq!(BreakLunchOrderRule.violations(&roster, &grid), 1);
}

#[test]
fn test_no_lunch_first_slot() {
    let hours = StoreHours::default();
    let late = Employee::new("Late", "SD", Shift::preset(ShiftKind::Late, false, &hours).unwrap());
    let roster = Roster::new(hours, vec![late], vec![RegisterTarget { count: 1, start: 0 }]).unwrap();
    let mut grid = Assignment::new(1, 40);
    grid.fill(0, 8..12, Duty::Lunch);
    assert_eq!(NoLunchFirstSlot.violations(&roster, &grid), 1);
}

#[test]
fn test_proofs() {
    let hours = StoreHours::default();
    let early = Employee::new("Early", "SD", Shift::preset(ShiftKind::Early, false, &hours).unwrap());
    let roster = Roster::new(
        hours,
        vec![early],
        vec![RegisterTarget { count: 2, start: 0 }],
    )
    .unwrap();
    // Nobody works after 5:45, and two registers can never be staffed.
    assert!(CashierAlways.prove_infeasible(&roster).unwrap().contains("5:45"));
    assert!(RegisterCount.prove_infeasible(&roster).is_some());

    let busy = Employee::new("Busy", "SD", Shift::preset(ShiftKind::Early, false, &hours).unwrap())
        .with_meeting(8..24);
    let roster = Roster::new(hours, vec![busy], vec![RegisterTarget { count: 1, start: 0 }]).unwrap();
    assert!(OneLunchHour.prove_infeasible(&roster).is_some());
}
