//! Employees working the day.

use serde::{Deserialize, Serialize};

use crate::shift::Shift;
use crate::time::SlotRange;

/// Index of an employee within the day's roster.
pub type EmployeeId = usize;

/// Capability flags that change which duties an employee may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Works the register all shift; never on floor, support or meeting
    /// duty, and exempt from imbalance comparisons.
    pub designated_cashier: bool,
    /// Belongs to the floor-coverage department whose members must keep
    /// the floor staffed.
    pub floor_coverage: bool,
}

/// One employee on the day's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub department: String,
    pub shift: Shift,
    pub capabilities: Capabilities,
    /// Fixed commitments, each a slot range inside the shift.
    pub meetings: Vec<SlotRange>,
}

impl Employee {
    pub fn new(name: impl Into<String>, department: impl Into<String>, shift: Shift) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            shift,
            capabilities: Capabilities::default(),
            meetings: Vec::new(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_meeting(mut self, meeting: SlotRange) -> Self {
        self.meetings.push(meeting);
        self
    }

    pub fn is_designated_cashier(&self) -> bool {
        self.capabilities.designated_cashier
    }

    pub fn is_full_time(&self) -> bool {
        self.shift.is_full_time()
    }

    /// Returns true if the employee is on shift during the slot.
    pub fn is_here(&self, slot: usize) -> bool {
        self.shift.contains(slot)
    }

    pub fn in_meeting(&self, slot: usize) -> bool {
        self.meetings.iter().any(|m| m.contains(&slot))
    }

    /// Returns true if the slot is on shift and free of meetings.
    pub fn is_free(&self, slot: usize) -> bool {
        self.is_here(slot) && !self.in_meeting(slot)
    }
}
