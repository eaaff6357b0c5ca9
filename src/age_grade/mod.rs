pub mod standards;
pub mod table;

pub use standards::RoadStandards;
pub use table::FactorTable;

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::{RaceResult, Sex};
use crate::parse::years_since;

/// Source of age-graded performance factors.
///
/// A factor of 1.0 matches the age standard for the athlete's age, sex and
/// distance. Implementations reject inputs they hold no standard for.
pub trait AgeGrader {
    fn age_graded_performance_factor(
        &self,
        age: u32,
        sex: Sex,
        distance_km: f64,
        time_secs: u32,
    ) -> Result<f64>;
}

/// Position of `distance_km` between `lower` and `upper` on a log scale,
/// 0.0 at `lower` and 1.0 at `upper`.
pub(crate) fn log_weight(distance_km: f64, lower: f64, upper: f64) -> f64 {
    (distance_km / lower).ln() / (upper / lower).ln()
}

/// Age-grade `result` for an athlete born on `dob`, storing the percent on
/// the result.
pub fn compute_age_grade(
    result: &mut RaceResult,
    dob: NaiveDate,
    grader: &dyn AgeGrader,
) -> Result<()> {
    let age = years_since(dob, result.race_date);
    let factor = grader.age_graded_performance_factor(
        age,
        result.sex,
        result.distance_km,
        result.time_secs,
    )?;
    result.age_grade_percent = Some(100.0 * factor);
    Ok(())
}
