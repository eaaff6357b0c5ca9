use chrono::NaiveDate;

use super::result::{RaceKind, Sex};

/// One roster line, already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub first_name: String,
    pub last_name: String,
    pub sex: Sex,
    pub dob: NaiveDate,
}

impl RosterEntry {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One race from the race list.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceListing {
    pub name: String,
    pub distance_km: f64,
    pub date: NaiveDate,
    pub kind: RaceKind,
    pub source: String,
}

/// One finisher from a race's result file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub athlete: String,
    pub time_secs: u32,
}
