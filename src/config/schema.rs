use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

pub const DEFAULT_TITLE: &str = "Road Race Championship";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Championship name shown on the index page
    #[serde(default = "default_title")]
    pub title: String,

    /// Season label for the combined leaderboards, e.g. "June 2025 - May 2026"
    #[serde(default)]
    pub season: Option<String>,

    /// Roster CSV
    #[serde(default = "default_athletes")]
    pub athletes: PathBuf,

    /// Race list CSV
    #[serde(default = "default_races")]
    pub races: PathBuf,

    /// Where the site is written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Reference date for race status and age categories, DD/MM/YYYY like
    /// `--as-of` and the race list (defaults to today)
    #[serde(default, with = "reference_date")]
    pub as_of: Option<NaiveDate>,

    /// Age-grading factor table CSV. Without one the built-in approximate
    /// road standards are used.
    #[serde(default)]
    pub age_factors: Option<PathBuf>,

    /// Stylesheet link, relative to the output directory
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,

    /// Table filter script, relative to the output directory
    #[serde(default = "default_script")]
    pub script: String,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: default_title(),
            season: None,
            athletes: default_athletes(),
            races: default_races(),
            output_dir: default_output_dir(),
            as_of: None,
            age_factors: None,
            stylesheet: default_stylesheet(),
            script: default_script(),
            scoring: None,
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_athletes() -> PathBuf {
    PathBuf::from("athletes_list.csv")
}

fn default_races() -> PathBuf {
    PathBuf::from("race_list.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_stylesheet() -> String {
    "css/styles.css".to_string()
}

fn default_script() -> String {
    "scripts/filters.js".to_string()
}

/// `as_of` in the same DD/MM/YYYY form as every other date the tool reads.
mod reference_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::parse::{format_date, parse_date};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_some(&format_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| parse_date(&text).map_err(de::Error::custom))
            .transpose()
    }
}
