//! CSV inputs: athlete roster, race list and per-race result files.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::age_grade::AgeGrader;
use crate::error::{ChampError, Result};
use crate::model::{RaceKind, RaceListing, ResultRow, RosterEntry};
use crate::parse::{parse_date, parse_distance, parse_flag, parse_sex, parse_time};
use crate::scoring::{Championship, ChampionshipBuilder, ScoringConfig};

#[derive(Debug, Deserialize)]
struct RosterRecord {
    first_name: String,
    last_name: String,
    sex: String,
    dob: String,
}

#[derive(Debug, Deserialize)]
struct RaceListRecord {
    name: String,
    distance: String,
    date: String,
    is_5k: String,
    is_marathon: String,
    source: String,
}

#[derive(Debug, Deserialize)]
struct ResultRecord {
    athlete: String,
    time: String,
}

/// Read every row of `path` positionally into `T`.
fn read_rows<T: DeserializeOwned>(path: &Path, has_headers: bool) -> Result<Vec<T>> {
    let csv_err = |source: csv::Error| ChampError::Csv {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(|source| ChampError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .trim(Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record).map_err(csv_err)? {
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.deserialize(None).map_err(csv_err)?);
    }
    Ok(rows)
}

/// Roster file: `first_name,last_name,sex,dob`, no header.
pub fn load_roster(path: &Path) -> Result<Vec<RosterEntry>> {
    read_rows::<RosterRecord>(path, false)?
        .into_iter()
        .map(|row| -> Result<RosterEntry> {
            Ok(RosterEntry {
                sex: parse_sex(&row.sex)?,
                dob: parse_date(&row.dob)?,
                first_name: row.first_name,
                last_name: row.last_name,
            })
        })
        .collect()
}

/// Race list: `name,distance,date,is_5k,is_marathon,source` after a header
/// row.
pub fn load_race_list(path: &Path) -> Result<Vec<RaceListing>> {
    read_rows::<RaceListRecord>(path, true)?
        .into_iter()
        .map(|row| -> Result<RaceListing> {
            let kind = RaceKind::from_flags(
                &row.name,
                parse_flag(&row.is_5k)?,
                parse_flag(&row.is_marathon)?,
            )?;
            Ok(RaceListing {
                distance_km: parse_distance(&row.distance)?,
                date: parse_date(&row.date)?,
                kind,
                name: row.name,
                source: row.source,
            })
        })
        .collect()
}

/// Result file: `athlete_full_name,elapsed_time`, no header.
pub fn load_results(path: &Path) -> Result<Vec<ResultRow>> {
    read_rows::<ResultRecord>(path, false)?
        .into_iter()
        .map(|row| -> Result<ResultRow> {
            Ok(ResultRow {
                time_secs: parse_time(&row.time)?,
                athlete: row.athlete,
            })
        })
        .collect()
}

/// Load and score a whole championship. Result sources are resolved
/// relative to the race list's directory.
pub fn load_championship(
    athletes_path: &Path,
    races_path: &Path,
    scoring: ScoringConfig,
    grader: &dyn AgeGrader,
    as_of: NaiveDate,
) -> Result<Championship> {
    let mut builder = ChampionshipBuilder::new(scoring, grader, as_of);

    let roster = load_roster(athletes_path)?;
    debug!("Loaded {} athletes from {}", roster.len(), athletes_path.display());
    for entry in &roster {
        builder.add_athlete(entry);
    }

    let base = races_path.parent().unwrap_or_else(|| Path::new(""));
    for listing in load_race_list(races_path)? {
        builder.add_race(listing, |listing| load_results(&base.join(&listing.source)))?;
    }

    Ok(builder.finish())
}
