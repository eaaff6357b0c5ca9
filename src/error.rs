use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChampError>;

#[derive(Error, Debug)]
pub enum ChampError {
    #[error("'{0}' is not a valid time")]
    InvalidTime(String),

    #[error("Distance '{0}' not valid")]
    InvalidDistance(String),

    #[error("'{0}' is not a valid date (expected DD/MM/YYYY)")]
    InvalidDate(String),

    #[error("'{0}' is not a valid sex (expected male or female)")]
    InvalidSex(String),

    #[error("'{0}' is not a valid flag (expected 0 or 1)")]
    InvalidFlag(String),

    #[error("Race '{0}' cannot be both a 5k and a marathon")]
    ConflictingRaceKind(String),

    #[error("Race '{name}' clashes with '{existing}', both would be written to the same page")]
    DuplicateRace { name: String, existing: String },

    #[error("No age-grading standard for age {0}")]
    AgeOutOfRange(u32),

    #[error("No age-grading standard for distance {0:.3} km")]
    DistanceOutOfRange(f64),

    #[error("{path}: invalid age-grading table: {reason}")]
    InvalidFactorTable { path: String, reason: String },

    #[error("Cannot age-grade a zero time for {0}")]
    ZeroTime(String),

    #[error("{path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
