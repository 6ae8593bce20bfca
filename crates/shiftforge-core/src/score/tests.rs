//! Tests for score types.

use super::*;

#[test]
fn test_hard_dominates_medium_and_soft() {
    let feasible = HardMediumSoftScore::from_penalties(0, 999, 999);
    let infeasible = HardMediumSoftScore::from_penalties(1, 0, 0);
    assert!(feasible > infeasible);
    assert!(feasible.is_feasible());
    assert!(!infeasible.is_feasible());
}

#[test]
fn test_medium_dominates_soft() {
    let a = HardMediumSoftScore::of(0, -10, -100);
    let b = HardMediumSoftScore::of(0, -5, -200);
    assert!(b.is_better_than(&a));
}

#[test]
fn test_from_penalties_negates() {
    let score = HardMediumSoftScore::from_penalties(2, 30, 4);
    assert_eq!(score, HardMediumSoftScore::of(-2, -30, -4));
    assert_eq!(score.level(ScoreLevel::Medium), -30);
    assert_eq!(
        HardMediumSoftScore::from_penalties(u64::MAX, 0, 0).hard(),
        i64::MIN
    );
}

#[test]
fn test_arithmetic() {
    let a = HardMediumSoftScore::of(-1, -2, -3);
    let b = HardMediumSoftScore::of(0, -4, 0);
    assert_eq!(a + b, HardMediumSoftScore::of(-1, -6, -3));
    assert_eq!(a - b, HardMediumSoftScore::of(-1, 2, -3));
    assert_eq!(-a, HardMediumSoftScore::of(1, 2, 3));
}

#[test]
fn test_worst_level() {
    assert!(HardMediumSoftScore::zero().is_perfect());
    assert_eq!(HardMediumSoftScore::ZERO.worst_level(), None);
    assert_eq!(
        HardMediumSoftScore::of_soft(-1).worst_level(),
        Some(ScoreLevel::Soft)
    );
    assert_eq!(
        HardMediumSoftScore::of(0, -1, -9).worst_level(),
        Some(ScoreLevel::Medium)
    );
    assert!(!HardMediumSoftScore::of_soft(-1).is_perfect());
}

#[test]
fn test_display() {
    assert_eq!(
        HardMediumSoftScore::of(0, -20, -7).to_string(),
        "0hard/-20medium/-7soft"
    );
}
