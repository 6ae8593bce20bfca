//! Duties assigned to each (employee, slot) cell.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The duty an employee performs during one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Duty {
    /// Not on shift.
    Unassigned,
    /// Regular floor work.
    Other,
    /// Part of the one-hour lunch.
    Lunch,
    /// A short break.
    Break,
    /// Running a register.
    Cashier,
    /// Helping at a register.
    Support,
    /// A fixed, immovable commitment.
    Meeting,
}

impl Duty {
    pub const ALL: [Duty; 7] = [
        Duty::Unassigned,
        Duty::Other,
        Duty::Lunch,
        Duty::Break,
        Duty::Cashier,
        Duty::Support,
        Duty::Meeting,
    ];

    /// Duties that count towards the register target.
    pub const REGISTER: [Duty; 2] = [Duty::Cashier, Duty::Support];

    /// Duties that occupy the breakroom.
    pub const BREAKROOM: [Duty; 2] = [Duty::Break, Duty::Lunch];

    /// Duties that mean the employee is on the floor and reachable.
    pub const AVAILABLE: [Duty; 3] = [Duty::Other, Duty::Cashier, Duty::Support];

    pub fn is_register(self) -> bool {
        matches!(self, Duty::Cashier | Duty::Support)
    }

    pub fn is_breakroom(self) -> bool {
        matches!(self, Duty::Break | Duty::Lunch)
    }

    /// Single-character glyph used by the terminal renderer.
    pub fn glyph(self) -> char {
        match self {
            Duty::Unassigned => 'x',
            Duty::Other => ' ',
            Duty::Lunch => 'L',
            Duty::Break => 'B',
            Duty::Cashier => 'C',
            Duty::Support => 'S',
            Duty::Meeting => 'M',
        }
    }
}

impl fmt::Display for Duty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Duty::Unassigned => "unassigned",
            Duty::Other => "other",
            Duty::Lunch => "lunch",
            Duty::Break => "break",
            Duty::Cashier => "cashier",
            Duty::Support => "support",
            Duty::Meeting => "meeting",
        };
        f.write_str(name)
    }
}
