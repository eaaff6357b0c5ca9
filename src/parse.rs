use chrono::{Datelike, NaiveDate};

use crate::error::{ChampError, Result};
use crate::model::Sex;

pub const DATE_FMT: &str = "%d/%m/%Y";
pub const KM_PER_MI: f64 = 1.60934;

/// Parse an elapsed time in `[[H:]MM:]SS` form into seconds.
///
/// Seconds and minutes must be in 0..=59. Hours are only accepted as the
/// leftmost of three components and are unbounded.
pub fn parse_time(time_str: &str) -> Result<u32> {
    let invalid = || ChampError::InvalidTime(time_str.to_string());
    let trimmed = time_str.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let parts: Vec<&str> = trimmed.split(':').rev().collect();
    if parts.len() > 3 {
        return Err(invalid());
    }

    let mut total: u32 = 0;
    for (i, part) in parts.iter().enumerate() {
        let part = part.trim();
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u32 = part.parse().map_err(|_| invalid())?;
        let is_hours = i == 2;
        if !is_hours && value > 59 {
            return Err(invalid());
        }
        let scaled = value.checked_mul(60u32.pow(i as u32)).ok_or_else(invalid)?;
        total = total.checked_add(scaled).ok_or_else(invalid)?;
    }
    Ok(total)
}

/// Format seconds as `[H:]MM:SS`; the hour part is omitted below one hour.
pub fn format_time(secs: u32) -> String {
    let hh = secs / 3600;
    let mm = (secs % 3600) / 60;
    let ss = secs % 60;
    if hh > 0 {
        format!("{}:{:02}:{:02}", hh, mm, ss)
    } else {
        format!("{:02}:{:02}", mm, ss)
    }
}

/// Parse `"<value> <km|mi>"` into kilometres.
pub fn parse_distance(distance: &str) -> Result<f64> {
    let invalid = || ChampError::InvalidDistance(distance.to_string());
    let mut tokens = distance.split_whitespace();
    let (Some(value), Some(units), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(invalid());
    };

    let value: f64 = value.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }

    let units = units.to_lowercase();
    if units.starts_with("km") {
        Ok(value)
    } else if units.starts_with("mi") {
        Ok(value * KM_PER_MI)
    } else {
        Err(invalid())
    }
}

pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), DATE_FMT)
        .map_err(|_| ChampError::InvalidDate(date_str.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

pub fn parse_sex(sex: &str) -> Result<Sex> {
    match sex.trim().to_lowercase().as_str() {
        "male" | "m" => Ok(Sex::Male),
        "female" | "f" => Ok(Sex::Female),
        _ => Err(ChampError::InvalidSex(sex.to_string())),
    }
}

pub fn parse_flag(flag: &str) -> Result<bool> {
    match flag.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(ChampError::InvalidFlag(flag.to_string())),
    }
}

/// Whole years elapsed from `from` to `to`. A birthday counts on the day
/// itself; a 29 February birthday counts on 1 March in common years.
pub fn years_since(from: NaiveDate, to: NaiveDate) -> u32 {
    to.years_since(from).unwrap_or(0)
}

/// Page-name form of a race or athlete name: spaces become `-`, lower-cased.
/// Two names with the same slug would share a page.
pub fn slug(name: &str) -> String {
    name.replace(' ', "-").to_lowercase()
}
