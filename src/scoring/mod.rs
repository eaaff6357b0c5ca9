pub mod config;
pub mod engine;
pub mod validation;

pub use config::*;
pub use engine::{Championship, ChampionshipBuilder, COMBINED_5K_NAME, COMBINED_MARATHON_NAME};
pub use validation::validate_scoring;
