//! Roster fixtures.

use shiftforge_core::{
    Assignment, Capabilities, Employee, RegisterTarget, Roster, Shift, ShiftKind, StoreHours,
};

use crate::grid::parse_grid;

fn preset(kind: ShiftKind, full_time: bool) -> Shift {
    Shift::preset(kind, full_time, &StoreHours::default()).expect("valid preset")
}

fn staff(name: &str, dept: &str, kind: ShiftKind, full_time: bool) -> Employee {
    Employee::new(name, dept, preset(kind, full_time))
}

fn cashier(name: &str, kind: ShiftKind) -> Employee {
    staff(name, "CASHIER", kind, false).with_capabilities(Capabilities {
        designated_cashier: true,
        floor_coverage: false,
    })
}

fn coverage(name: &str, kind: ShiftKind, full_time: bool) -> Employee {
    staff(name, "NBC", kind, full_time).with_capabilities(Capabilities {
        designated_cashier: false,
        floor_coverage: true,
    })
}

fn targets(pairs: &[(usize, usize)]) -> Vec<RegisterTarget> {
    pairs
        .iter()
        .map(|&(count, start)| RegisterTarget { count, start })
        .collect()
}

/// Two full-timers covering one register all day.
///
/// Avery works 10:00-6:30, Blake 11:15-8:00.
pub fn pair_roster() -> Roster {
    Roster::new(
        StoreHours::default(),
        vec![
            staff("Avery", "SD", ShiftKind::Early, true),
            staff("Blake", "EB", ShiftKind::Late, true),
        ],
        targets(&[(1, 0)]),
    )
    .expect("valid roster")
}

/// A grid for [`pair_roster`] that satisfies every hard rule.
///
/// Blake's first break sits three slots before lunch, so the break/lunch
/// gap rules are each broken once.
pub fn pair_grid() -> Assignment {
    parse_grid(&[
        "CCCC|CCCC|LLLL|CCCC|CCCC|..B.|..C.|B...|..xx|xxxx",
        "xxxx|x...|CCCC|.B..|LLLL|CCCC|CCBC|CCCC|CCCC|CCCC",
    ])
}

/// Six employees: a designated cashier, a lone floor-coverage member and
/// four regular staff. Two registers from noon.
pub fn small_roster() -> Roster {
    Roster::new(
        StoreHours::default(),
        vec![
            cashier("Cass", ShiftKind::Early),
            coverage("Nico", ShiftKind::Early, false),
            staff("Ann", "SD", ShiftKind::Early, false),
            staff("Bo", "SD", ShiftKind::Middle, false),
            staff("Dee", "EB", ShiftKind::Late, false),
            staff("Eli", "EB", ShiftKind::Late, true),
        ],
        targets(&[(1, 0), (2, 8)]),
    )
    .expect("valid roster")
}

/// A busier weekday: fifteen employees, two coverage members and one
/// designated cashier on a middle shift.
pub fn weekday_roster() -> Roster {
    let hours = StoreHours::default();
    Roster::new(
        hours,
        vec![
            staff("Mara", "SD", ShiftKind::Early, true),
            staff("Kofi", "OTHER", ShiftKind::Early, true),
            staff("Mina", "EB", ShiftKind::Early, true),
            staff("Sol", "OTHER", ShiftKind::Early, false),
            staff("Jun", "EB", ShiftKind::Early, false),
            staff("Rae", "JB", ShiftKind::Early, false),
            staff("Noor", "OTHER", ShiftKind::Late, true),
            staff("Milo", "JB", ShiftKind::Late, false),
            staff("Jade", "CB", ShiftKind::Late, false),
            staff("Remy", "SD", ShiftKind::Late, false),
            staff("Yara", "JB", ShiftKind::Late, false),
            staff("Pia", "EB", ShiftKind::Late, false),
            cashier("Mae", ShiftKind::Middle),
            coverage("Dov", ShiftKind::Early, false),
            coverage("Tess", ShiftKind::Late, true),
        ],
        targets(&[(1, 0), (2, 6), (1, 34)]),
    )
    .expect("valid roster")
}
