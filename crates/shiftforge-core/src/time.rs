//! Store hours and slot arithmetic.
//!
//! The shift day is partitioned into equal, contiguous slots starting at the
//! opening hour. Time strings use the store's `H:MM` convention: an hour
//! earlier than the opening hour denotes the afternoon, so with a 10:00
//! opening `5:45` is 17:45.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftforgeError};

/// A half-open range of slot indices.
pub type SlotRange = Range<usize>;

/// Opening hours and slot granularity of the store.
///
/// # Examples
///
/// ```
/// use shiftforge_core::StoreHours;
///
/// let hours = StoreHours::default();
/// assert_eq!(hours.num_slots(), 40);
/// assert_eq!(hours.parse_time("12:00").unwrap(), 8);
/// assert_eq!(hours.parse_time("5:45").unwrap(), 31);
/// assert_eq!(hours.slot_to_time(31), "5:45");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreHours {
    /// Opening hour on a 24-hour clock.
    pub open_hour: u32,
    /// Closing hour on a 24-hour clock.
    pub close_hour: u32,
    /// Length of one slot; must divide an hour evenly.
    pub minutes_per_slot: u32,
}

impl Default for StoreHours {
    fn default() -> Self {
        Self {
            open_hour: 10,
            close_hour: 20,
            minutes_per_slot: 15,
        }
    }
}

impl StoreHours {
    /// Checks that the hours describe a non-empty day of whole slots.
    pub fn validate(&self) -> Result<()> {
        if self.open_hour >= self.close_hour || self.close_hour > 24 {
            return Err(ShiftforgeError::Config(format!(
                "store hours {}..{} are not a valid day",
                self.open_hour, self.close_hour
            )));
        }
        if self.minutes_per_slot == 0 || 60 % self.minutes_per_slot != 0 {
            return Err(ShiftforgeError::Config(format!(
                "{} minutes per slot does not divide an hour",
                self.minutes_per_slot
            )));
        }
        Ok(())
    }

    pub fn slots_per_hour(&self) -> usize {
        (60 / self.minutes_per_slot) as usize
    }

    pub fn hours_open(&self) -> usize {
        (self.close_hour - self.open_hour) as usize
    }

    /// Total number of slots in the day.
    pub fn num_slots(&self) -> usize {
        self.hours_open() * self.slots_per_hour()
    }

    /// All slots of the day.
    pub fn day(&self) -> SlotRange {
        0..self.num_slots()
    }

    /// Maps an `H:MM` string to a slot index.
    ///
    /// The closing time itself maps to `num_slots()` so that it can be used
    /// as the exclusive end of a range.
    pub fn parse_time(&self, t: &str) -> Result<usize> {
        let invalid = || ShiftforgeError::InvalidTime(t.to_string());
        let (hour, minute) = t.trim().split_once(':').ok_or_else(invalid)?;
        let mut hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        if minute >= 60 {
            return Err(invalid());
        }
        if hour < self.open_hour {
            hour += 12;
        }
        if hour < self.open_hour || hour > self.close_hour {
            return Err(invalid());
        }
        if hour == self.close_hour && minute != 0 {
            return Err(invalid());
        }
        let slot = (hour - self.open_hour) as usize * self.slots_per_hour()
            + (minute / self.minutes_per_slot) as usize;
        Ok(slot)
    }

    /// Parses an `H:MM-H:MM` string into a non-empty slot range.
    pub fn parse_range(&self, s: &str) -> Result<SlotRange> {
        let (start, stop) = s
            .split_once('-')
            .ok_or_else(|| ShiftforgeError::InvalidTime(s.to_string()))?;
        self.range_between(start, stop)
    }

    /// Builds the slot range between two `H:MM` strings.
    pub fn range_between(&self, start: &str, stop: &str) -> Result<SlotRange> {
        let start_slot = self.parse_time(start)?;
        let stop_slot = self.parse_time(stop)?;
        if start_slot >= stop_slot {
            return Err(ShiftforgeError::InvalidTime(format!("{start}-{stop}")));
        }
        Ok(start_slot..stop_slot)
    }

    /// Renders a slot index on the 12-hour clock.
    pub fn slot_to_time(&self, slot: usize) -> String {
        let sph = self.slots_per_hour();
        let mut hour = self.open_hour as usize + slot / sph;
        if hour > 12 {
            hour -= 12;
        }
        let minutes = (slot % sph) * self.minutes_per_slot as usize;
        format!("{hour}:{minutes:02}")
    }

    /// Returns the slot that starts at the given 24-hour clock hour.
    pub fn slot_at_hour(&self, hour: u32) -> Option<usize> {
        if hour < self.open_hour || hour >= self.close_hour {
            return None;
        }
        Some((hour - self.open_hour) as usize * self.slots_per_hour())
    }

    /// Returns true if the slot is the first slot of an hour.
    pub fn is_on_the_hour(&self, slot: usize) -> bool {
        slot % self.slots_per_hour() == 0
    }
}
