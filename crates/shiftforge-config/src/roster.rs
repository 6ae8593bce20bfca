//! Weekly roster files.
//!
//! A roster file holds the employee directory and, per weekday, who works
//! which shift, how many registers must be open from when, and any fixed
//! meetings. [`RosterConfig::build_roster`] turns one weekday into the
//! immutable [`Roster`] a planning run consumes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shiftforge_core::{Capabilities, Employee, RegisterTarget, Roster, Shift, StoreHours};

use crate::{is_yaml, read, ConfigError};

/// Day of the week a schedule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Maps 0 (Monday) through 6 (Sunday).
    pub fn from_monday(days: u32) -> Option<Self> {
        Self::ALL.get(days as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.name() == lower || day.name()[..3] == lower)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown weekday {s:?}")))
    }
}

fn default_designated_department() -> String {
    "CASHIER".to_string()
}

fn default_coverage_department() -> String {
    "NBC".to_string()
}

/// Employee directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmployeeEntry {
    #[serde(default)]
    pub full_time: bool,
    pub department: String,
}

/// One person's shift on a day: a preset code or `H:MM-H:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShiftEntry {
    pub name: String,
    pub shift: String,
}

/// Desired register count from an `H:MM` start time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetEntry {
    pub count: usize,
    pub start: String,
}

/// Everything scheduled for one weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DayConfig {
    #[serde(default)]
    pub shifts: Vec<ShiftEntry>,
    #[serde(default)]
    pub register_targets: Vec<TargetEntry>,
    /// Name to `[start, end]` pairs.
    #[serde(default)]
    pub meetings: BTreeMap<String, Vec<[String; 2]>>,
}

/// A weekly roster file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub hours: StoreHours,

    /// Department whose members work the register all shift.
    #[serde(default = "default_designated_department")]
    pub designated_cashier_department: String,

    /// Department whose members keep the floor covered.
    #[serde(default = "default_coverage_department")]
    pub floor_coverage_department: String,

    pub employees: BTreeMap<String, EmployeeEntry>,

    /// Keyed by lowercase weekday name.
    #[serde(default)]
    pub days: BTreeMap<String, DayConfig>,
}

impl RosterConfig {
    /// Loads a roster file, TOML or YAML by extension.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or doesn't parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = read(path)?;
        if is_yaml(path) {
            Self::from_yaml_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// Parses a roster from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.check_days()?;
        Ok(config)
    }

    /// Parses a roster from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.check_days()?;
        Ok(config)
    }

    fn check_days(&self) -> Result<(), ConfigError> {
        for key in self.days.keys() {
            key.parse::<Weekday>()?;
        }
        Ok(())
    }

    /// The schedule for a weekday, if configured.
    pub fn day(&self, day: Weekday) -> Option<&DayConfig> {
        self.days
            .iter()
            .find(|(key, _)| key.parse::<Weekday>().ok() == Some(day))
            .map(|(_, config)| config)
    }

    fn entry(&self, name: &str) -> Result<&EmployeeEntry, ConfigError> {
        self.employees
            .get(name)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown employee {name:?}")))
    }

    /// Builds the validated roster for one weekday.
    ///
    /// # Errors
    ///
    /// Returns an error for a day without a schedule, unknown names,
    /// malformed times or shift codes, and anything [`Roster::new`]
    /// rejects.
    pub fn build_roster(&self, day: Weekday) -> Result<Roster, ConfigError> {
        let schedule = self
            .day(day)
            .ok_or_else(|| ConfigError::Invalid(format!("no schedule for {day}")))?;

        for name in schedule.meetings.keys() {
            if !schedule.shifts.iter().any(|s| &s.name == name) {
                return Err(ConfigError::Invalid(format!(
                    "{name} has a meeting on {day} but is not working"
                )));
            }
        }

        let mut employees = Vec::with_capacity(schedule.shifts.len());
        for ShiftEntry { name, shift } in &schedule.shifts {
            let entry = self.entry(name)?;
            let shift = Shift::parse(shift, entry.full_time, &self.hours)?;
            let capabilities = Capabilities {
                designated_cashier: entry.department == self.designated_cashier_department,
                floor_coverage: entry.department == self.floor_coverage_department,
            };
            let mut employee = Employee::new(name.clone(), entry.department.clone(), shift)
                .with_capabilities(capabilities);
            for [start, stop] in schedule.meetings.get(name).into_iter().flatten() {
                employee = employee.with_meeting(self.hours.range_between(start, stop)?);
            }
            employees.push(employee);
        }

        let targets = schedule
            .register_targets
            .iter()
            .map(|t| {
                Ok(RegisterTarget {
                    count: t.count,
                    start: self.hours.parse_time(&t.start)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Roster::new(self.hours, employees, targets)?)
    }
}
