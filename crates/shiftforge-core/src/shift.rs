//! Shifts and the lunch/break policy derived from them.
//!
//! A shift is defined by its slot window. Lunch timing, lunch priority and
//! the preferred order of breaks around lunch depend on which preset the
//! shift resembles (early, middle or late) and on full-time status.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftforgeError};
use crate::time::{SlotRange, StoreHours};

/// First and last hour (24h clock) at which a lunch may start.
pub const LUNCH_START_HOURS: [u32; 4] = [12, 13, 14, 15];

/// The preset a shift was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    Early,
    Middle,
    Late,
    /// An explicit time range; lunch policy follows the most similar preset.
    Custom,
}

impl ShiftKind {
    /// Parses the single-letter preset codes `E`, `M` and `L`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "E" => Some(ShiftKind::Early),
            "M" => Some(ShiftKind::Middle),
            "L" => Some(ShiftKind::Late),
            _ => None,
        }
    }
}

/// Preferred order of the two breaks relative to lunch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakLunchOrder {
    /// Lunch, first break, second break.
    LunchFirst,
    /// First break, lunch, second break.
    LunchBetween,
    /// First break, second break, lunch.
    LunchLast,
}

/// One employee's working window for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    kind: ShiftKind,
    full_time: bool,
    window: SlotRange,
}

impl Shift {
    /// Builds a preset shift.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for `Custom` or for a middle shift
    /// worked full-time, which has no preset.
    pub fn preset(kind: ShiftKind, full_time: bool, hours: &StoreHours) -> Result<Self> {
        let (start, stop) = match (kind, full_time) {
            (ShiftKind::Early, true) => ("10:00", "6:30"),
            (ShiftKind::Early, false) => ("10:00", "5:45"),
            (ShiftKind::Middle, false) => ("11:00", "7:00"),
            (ShiftKind::Late, true) => ("11:15", "8:00"),
            (ShiftKind::Late, false) => ("12:00", "8:00"),
            _ => {
                return Err(ShiftforgeError::Config(format!(
                    "no preset for {:?} shift (full-time: {})",
                    kind, full_time
                )))
            }
        };
        Ok(Self {
            kind,
            full_time,
            window: hours.range_between(start, stop)?,
        })
    }

    /// Builds a shift from an explicit window.
    pub fn custom(window: SlotRange, full_time: bool) -> Self {
        Self {
            kind: ShiftKind::Custom,
            full_time,
            window,
        }
    }

    /// Parses a shift code: `E`, `M`, `L` or `H:MM-H:MM`.
    pub fn parse(code: &str, full_time: bool, hours: &StoreHours) -> Result<Self> {
        match ShiftKind::from_code(code) {
            Some(kind) => Self::preset(kind, full_time, hours),
            None => Ok(Self::custom(hours.parse_range(code)?, full_time)),
        }
    }

    pub fn kind(&self) -> ShiftKind {
        self.kind
    }

    pub fn is_full_time(&self) -> bool {
        self.full_time
    }

    pub fn window(&self) -> SlotRange {
        self.window.clone()
    }

    pub fn start(&self) -> usize {
        self.window.start
    }

    pub fn stop(&self) -> usize {
        self.window.end
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn contains(&self, slot: usize) -> bool {
        self.window.contains(&slot)
    }

    /// The preset whose lunch policy applies to this shift.
    pub fn policy_kind(&self, hours: &StoreHours) -> ShiftKind {
        if self.kind != ShiftKind::Custom {
            return self.kind;
        }
        let eleven = hours.slot_at_hour(11).unwrap_or(0);
        let noon = hours.slot_at_hour(12).unwrap_or(0);
        if self.window.start < eleven {
            ShiftKind::Early
        } else if self.window.end < noon {
            ShiftKind::Middle
        } else {
            ShiftKind::Late
        }
    }

    /// Lunch priority: employees with a higher priority eat first.
    pub fn lunch_priority(&self, hours: &StoreHours) -> u8 {
        match self.policy_kind(hours) {
            ShiftKind::Early => 2,
            ShiftKind::Middle => 1,
            _ => 0,
        }
    }

    /// The lunch start hours (24h clock) preferred for this shift.
    pub fn strict_lunch_hours(&self, hours: &StoreHours) -> [u32; 2] {
        match self.policy_kind(hours) {
            ShiftKind::Early => [12, 13],
            ShiftKind::Middle => [13, 14],
            _ => [14, 15],
        }
    }

    /// Preferred break order for a lunch starting at the given hour.
    pub fn break_lunch_order(&self, lunch_hour: u32, hours: &StoreHours) -> BreakLunchOrder {
        let kind = self.policy_kind(hours);
        let full_time = self.full_time;
        match lunch_hour {
            13 if kind == ShiftKind::Early => BreakLunchOrder::LunchBetween,
            14 if !(kind == ShiftKind::Late && !full_time) => BreakLunchOrder::LunchBetween,
            15 if kind == ShiftKind::Early && !full_time => BreakLunchOrder::LunchLast,
            15 => BreakLunchOrder::LunchBetween,
            _ => BreakLunchOrder::LunchFirst,
        }
    }
}
