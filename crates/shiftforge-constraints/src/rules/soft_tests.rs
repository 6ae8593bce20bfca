//! Tests for the soft tier.

use super::*;
use shiftforge_test::{pair_grid, pair_roster, small_roster, weekday_roster};

fn violations_of(id: &str, roster: &Roster, grid: &Assignment) -> u64 {
    soft_rules()
        .into_iter()
        .find(|spec| spec.id() == id)
        .map(|spec| spec.violations(roster, grid))
        .unwrap_or_else(|| panic!("no soft rule {id}"))
}

#[test]
fn test_soft_ids_are_unique() {
    let rules = soft_rules();
    let mut ids: Vec<&str> = rules.iter().map(|s| s.id()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), rules.len());
}

#[test]
fn test_pair_grid_break_lunch_gaps() {
    let roster = pair_roster();
    let grid = pair_grid();
    // Blake's first break is three slots before lunch.
    assert_eq!(violations_of("break-lunch-gap-3", &roster, &grid), 1);
    assert_eq!(violations_of("break-lunch-gap-4", &roster, &grid), 1);
    assert_eq!(violations_of("break-bound-gap-44", &roster, &grid), 0);
    assert_eq!(violations_of("break-bound-gap-54", &roster, &grid), 0);
}

#[test]
fn test_pair_grid_lunch_rules() {
    let roster = pair_roster();
    let grid = pair_grid();
    assert_eq!(violations_of("lunch-strict-bounds", &roster, &grid), 0);
    assert_eq!(violations_of("lunch-fair-order", &roster, &grid), 0);
    assert_eq!(violations_of("lunch-balance", &roster, &grid), 0);
    assert_eq!(violations_of("fulltime-avail", &roster, &grid), 0);
}

#[test]
fn test_lunch_fair_order_detects_late_early_shift() {
    let roster = pair_roster();
    let mut grid = pair_grid();
    // Move Avery's lunch to 3:00, after Blake's 2:00 lunch.
    grid.fill(0, 8..12, Duty::Cashier);
    grid.fill(0, 20..24, Duty::Lunch);
    assert_eq!(violations_of("lunch-fair-order", &roster, &grid), 1);
    assert_eq!(violations_of("lunch-strict-bounds", &roster, &grid), 1);
}

#[test]
fn test_aesthetics_orders_cashier_runs() {
    let roster = pair_roster();
    let mut grid = pair_grid();
    assert_eq!(Aesthetics.violations(&roster, &grid), 0);
    // Avery on the register at 6:15 while Blake runs it from 6:00.
    grid.set(0, 33, Duty::Cashier);
    assert_eq!(Aesthetics.violations(&roster, &grid), 2);
}

#[test]
fn test_register_span_cap() {
    let roster = pair_roster();
    let grid = pair_grid();
    assert!(violations_of("register-max-4-in-16", &roster, &grid) > 0);
    let quiet = RegisterInSpan { cap: 16, span: 16 };
    assert_eq!(quiet.violations(&roster, &grid), 0);
}

#[test]
fn test_no_register_first_thing() {
    let roster = pair_roster();
    let mut grid = pair_grid();
    assert_eq!(NoRegisterFirstThing.violations(&roster, &grid), 0);
    grid.set(1, 5, Duty::Support);
    assert_eq!(NoRegisterFirstThing.violations(&roster, &grid), 1);
}

#[test]
fn test_lone_coverage_stays_off_registers() {
    let roster = small_roster();
    let mut grid = Assignment::new(roster.len(), roster.num_slots());
    grid.set(1, 3, Duty::Support);
    grid.set(1, 4, Duty::Cashier);
    assert_eq!(CoverageNoRegisterIfAlone.violations(&roster, &grid), 2);
    // A single coverage member has nobody to share availability with.
    let avail = Availability::new(Group::FloorCoverage, &[Duty::Other], 0);
    assert_eq!(avail.violations(&roster, &grid), 0);
}

#[test]
fn test_coverage_availability_with_exceptions() {
    let roster = weekday_roster();
    let mut grid = Assignment::new(roster.len(), roster.num_slots());
    assert_eq!(violations_of("coverage-avail", &roster, &grid), 40);
    assert_eq!(violations_of("coverage-avail-except-4", &roster, &grid), 36);

    let dov = roster.find("Dov").unwrap();
    let tess = roster.find("Tess").unwrap();
    grid.fill(dov, 0..31, Duty::Other);
    grid.fill(tess, 31..40, Duty::Other);
    assert_eq!(violations_of("coverage-avail", &roster, &grid), 0);
}

#[test]
fn test_simultaneous_caps_respect_staff_size() {
    let roster = weekday_roster();
    let mut grid = Assignment::new(roster.len(), roster.num_slots());
    for id in roster.employee_ids() {
        grid.set(id, 0, Duty::Break);
    }
    assert_eq!(violations_of("break-3", &roster, &grid), 12);
    assert_eq!(violations_of("breakroom-7", &roster, &grid), 8);
    // Fifteen employees: the small-day caps do not apply.
    assert_eq!(violations_of("breakroom-4-if-12", &roster, &grid), 0);
}
