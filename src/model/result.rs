use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ChampError, Result};

/// Marathon results are graded at the canonical distance whatever the race
/// list says.
pub const MARATHON_KM: f64 = 42.195;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn short_label(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// Which leaderboard a race feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RaceKind {
    /// A nominated club race, scored on its own.
    Club,
    FiveK,
    Marathon,
}

impl RaceKind {
    pub fn from_flags(race_name: &str, is_5k: bool, is_marathon: bool) -> Result<Self> {
        match (is_5k, is_marathon) {
            (false, false) => Ok(RaceKind::Club),
            (true, false) => Ok(RaceKind::FiveK),
            (false, true) => Ok(RaceKind::Marathon),
            (true, true) => Err(ChampError::ConflictingRaceKind(race_name.to_string())),
        }
    }

    pub fn is_5k(&self) -> bool {
        matches!(self, RaceKind::FiveK)
    }

    pub fn is_marathon(&self) -> bool {
        matches!(self, RaceKind::Marathon)
    }

    pub fn is_nominated(&self) -> bool {
        matches!(self, RaceKind::Club)
    }
}

/// One athlete's performance in one race.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceResult {
    pub race_name: String,
    pub athlete: String,
    pub race_date: NaiveDate,
    pub time_secs: u32,
    pub distance_km: f64,
    pub sex: Sex,
    pub kind: RaceKind,
    pub time_score: u32,
    pub age_grade_percent: Option<f64>,
    pub age_grade_score: u32,
}

impl RaceResult {
    pub fn new(
        race_name: impl Into<String>,
        athlete: impl Into<String>,
        race_date: NaiveDate,
        time_secs: u32,
        distance_km: f64,
        sex: Sex,
        kind: RaceKind,
    ) -> Self {
        let distance_km = if kind.is_marathon() {
            MARATHON_KM
        } else {
            distance_km
        };
        Self {
            race_name: race_name.into(),
            athlete: athlete.into(),
            race_date,
            time_secs,
            distance_km,
            sex,
            kind,
            time_score: 0,
            age_grade_percent: None,
            age_grade_score: 0,
        }
    }

    pub fn total_score(&self) -> u32 {
        self.time_score + self.age_grade_score
    }

    pub fn is_nominated(&self) -> bool {
        self.kind.is_nominated()
    }
}

/// Handle to a result held by a [`ResultStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultId(usize);

/// Single owner of every [`RaceResult`] in a run. Athletes, races and the
/// combined leaderboards all hold [`ResultId`]s into it, so a score written
/// once is seen through every handle.
#[derive(Debug, Default, Clone)]
pub struct ResultStore {
    results: Vec<RaceResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, result: RaceResult) -> ResultId {
        self.results.push(result);
        ResultId(self.results.len() - 1)
    }

    /// Ids are only minted by `insert`, so indexing cannot go out of bounds
    /// for an id from this store.
    pub fn get(&self, id: ResultId) -> &RaceResult {
        &self.results[id.0]
    }

    pub fn get_mut(&mut self, id: ResultId) -> &mut RaceResult {
        &mut self.results[id.0]
    }
}
