//! Bundled road-running age standards.
//!
//! These are an approximation, not the WMA age-grading tables. Open-class
//! standards are anchored at common road distances close to the WMA 2015
//! road open standards and interpolated on a log-log scale between anchors,
//! extrapolating from the nearest segment out to [`MIN_KM`] and [`MAX_KM`].
//! Age factors are 1.0 across the open ages and fall away quadratically on
//! either side. The veteran decline is fitted separately at 5 km and at the
//! marathon and interpolated over log distance, so longer races decline
//! faster with age as in the published tables. Expect grades within a few
//! percent of the official ones; load a [`FactorTable`](super::FactorTable)
//! for exact grading.

use super::{log_weight, AgeGrader};
use crate::error::{ChampError, Result};
use crate::model::{Sex, MARATHON_KM};

pub const MIN_AGE: u32 = 5;
pub const MAX_AGE: u32 = 100;
pub const MIN_KM: f64 = 1.0;
pub const MAX_KM: f64 = 100.0;

const SHORT_KM: f64 = 5.0;

/// (distance km, male open standard s, female open standard s)
const OPEN_STANDARDS: [(f64, f64, f64); 10] = [
    (5.0, 769.0, 858.0),
    (8.0, 1275.0, 1428.0),
    (10.0, 1603.0, 1785.0),
    (15.0, 2467.0, 2760.0),
    (16.0934, 2665.0, 2980.0),
    (20.0, 3350.0, 3760.0),
    (21.0975, 3535.0, 3965.0),
    (25.0, 4240.0, 4770.0),
    (30.0, 5170.0, 5790.0),
    (42.195, 7377.0, 8125.0),
];

/// Veteran decline `1 - linear * y - quadratic * y^2`, `y` years past the peak.
#[derive(Debug, Clone, Copy)]
struct Decline {
    linear: f64,
    quadratic: f64,
}

#[derive(Debug, Clone, Copy)]
struct AgeCurve {
    /// First age graded at the open standard.
    peak_start: u32,
    /// Last age graded at the open standard.
    peak_end: u32,
    youth: f64,
    short: Decline,
    marathon: Decline,
}

const MALE_CURVE: AgeCurve = AgeCurve {
    peak_start: 20,
    peak_end: 30,
    youth: 0.0022,
    short: Decline { linear: 0.0040, quadratic: 7.0e-5 },
    marathon: Decline { linear: 0.0050, quadratic: 8.5e-5 },
};

const FEMALE_CURVE: AgeCurve = AgeCurve {
    peak_start: 20,
    peak_end: 30,
    youth: 0.0022,
    short: Decline { linear: 0.0046, quadratic: 7.4e-5 },
    marathon: Decline { linear: 0.0058, quadratic: 8.8e-5 },
};

impl AgeCurve {
    fn factor(&self, age: u32, distance_km: f64) -> f64 {
        if age < self.peak_start {
            let years = f64::from(self.peak_start - age);
            1.0 - self.youth * years * years
        } else if age <= self.peak_end {
            1.0
        } else {
            let w = log_weight(distance_km.clamp(SHORT_KM, MARATHON_KM), SHORT_KM, MARATHON_KM);
            let linear = self.short.linear + w * (self.marathon.linear - self.short.linear);
            let quadratic = self.short.quadratic + w * (self.marathon.quadratic - self.short.quadratic);
            let years = f64::from(age - self.peak_end);
            1.0 - linear * years - quadratic * years * years
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RoadStandards;

impl RoadStandards {
    pub fn new() -> Self {
        Self
    }

    /// Open-class standard time in seconds for `distance_km`.
    pub fn open_standard(&self, sex: Sex, distance_km: f64) -> Result<f64> {
        if !distance_km.is_finite() || !(MIN_KM..=MAX_KM).contains(&distance_km) {
            return Err(ChampError::DistanceOutOfRange(distance_km));
        }

        let pick = |anchor: &(f64, f64, f64)| match sex {
            Sex::Male => (anchor.0, anchor.1),
            Sex::Female => (anchor.0, anchor.2),
        };

        let last = OPEN_STANDARDS.len() - 1;
        let segment = OPEN_STANDARDS
            .windows(2)
            .position(|pair| distance_km <= pair[1].0)
            .unwrap_or(last - 1);

        let (d0, t0) = pick(&OPEN_STANDARDS[segment]);
        let (d1, t1) = pick(&OPEN_STANDARDS[segment + 1]);
        let exponent = (t1 / t0).ln() / (d1 / d0).ln();
        Ok(t0 * (distance_km / d0).powf(exponent))
    }

    /// Fraction of the open standard expected at `age` over `distance_km`.
    pub fn age_factor(&self, sex: Sex, age: u32, distance_km: f64) -> Result<f64> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ChampError::AgeOutOfRange(age));
        }
        let curve = match sex {
            Sex::Male => MALE_CURVE,
            Sex::Female => FEMALE_CURVE,
        };
        Ok(curve.factor(age, distance_km))
    }
}

impl AgeGrader for RoadStandards {
    fn age_graded_performance_factor(
        &self,
        age: u32,
        sex: Sex,
        distance_km: f64,
        time_secs: u32,
    ) -> Result<f64> {
        if time_secs == 0 {
            return Err(ChampError::ZeroTime(format!("{:.3} km", distance_km)));
        }
        let open = self.open_standard(sex, distance_km)?;
        let age_factor = self.age_factor(sex, age, distance_km)?;
        Ok(open / (age_factor * f64::from(time_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_open_standard_at_anchor() {
        let standards = RoadStandards::new();
        assert!(close(standards.open_standard(Sex::Male, 5.0).unwrap(), 769.0));
        assert!(close(standards.open_standard(Sex::Female, 42.195).unwrap(), 8125.0));
    }

    #[test]
    fn test_open_standard_interpolates_between_anchors() {
        let standards = RoadStandards::new();
        let nine_k = standards.open_standard(Sex::Male, 9.0).unwrap();
        assert!(nine_k > 1275.0 && nine_k < 1603.0);
    }

    #[test]
    fn test_open_standard_extrapolates_inside_limits() {
        let standards = RoadStandards::new();
        let three_k = standards.open_standard(Sex::Female, 3.0).unwrap();
        assert!(three_k > 0.0 && three_k < 858.0);
        let fifty_k = standards.open_standard(Sex::Male, 50.0).unwrap();
        assert!(fifty_k > 7377.0);
    }

    #[test]
    fn test_open_standard_rejects_out_of_range() {
        let standards = RoadStandards::new();
        assert!(matches!(
            standards.open_standard(Sex::Male, 0.4),
            Err(ChampError::DistanceOutOfRange(_))
        ));
        assert!(standards.open_standard(Sex::Male, 160.0).is_err());
        assert!(standards.open_standard(Sex::Male, f64::NAN).is_err());
    }

    #[test]
    fn test_age_factor_peak_and_decline() {
        let standards = RoadStandards::new();
        assert_eq!(standards.age_factor(Sex::Male, 25, 10.0).unwrap(), 1.0);
        assert_eq!(standards.age_factor(Sex::Male, 30, 10.0).unwrap(), 1.0);

        let fifty = standards.age_factor(Sex::Male, 50, 10.0).unwrap();
        let seventy = standards.age_factor(Sex::Male, 70, 10.0).unwrap();
        assert!(fifty < 1.0 && seventy < fifty && seventy > 0.0);
        assert!(standards.age_factor(Sex::Female, 100, MAX_KM).unwrap() > 0.0);
        assert!(standards.age_factor(Sex::Male, 12, 5.0).unwrap() < 1.0);
    }

    #[test]
    fn test_age_factor_depends_on_distance() {
        let standards = RoadStandards::new();
        let five_k = standards.age_factor(Sex::Female, 60, 5.0).unwrap();
        let half = standards.age_factor(Sex::Female, 60, 21.0975).unwrap();
        let marathon = standards.age_factor(Sex::Female, 60, MARATHON_KM).unwrap();
        assert!(five_k > half && half > marathon);

        // 1.0 - 0.0040 * 30 - 7.0e-5 * 900
        assert!(close(standards.age_factor(Sex::Male, 60, 5.0).unwrap(), 0.817));
        // clamped to the fitted range
        assert_eq!(
            standards.age_factor(Sex::Male, 60, 2.0).unwrap(),
            standards.age_factor(Sex::Male, 60, 5.0).unwrap()
        );
        assert_eq!(
            standards.age_factor(Sex::Male, 60, 80.0).unwrap(),
            standards.age_factor(Sex::Male, 60, MARATHON_KM).unwrap()
        );
    }

    #[test]
    fn test_age_factor_rejects_out_of_range() {
        let standards = RoadStandards::new();
        assert!(matches!(standards.age_factor(Sex::Male, 4, 5.0), Err(ChampError::AgeOutOfRange(4))));
        assert!(standards.age_factor(Sex::Female, 101, 5.0).is_err());
    }

    #[test]
    fn test_performance_factor_open_age() {
        let standards = RoadStandards::new();
        let factor = standards
            .age_graded_performance_factor(30, Sex::Male, 5.0, 1200)
            .unwrap();
        assert!(close(factor, 769.0 / 1200.0));
    }

    #[test]
    fn test_older_athlete_grades_higher_for_same_time() {
        let standards = RoadStandards::new();
        let young = standards.age_graded_performance_factor(30, Sex::Female, 10.0, 2700).unwrap();
        let old = standards.age_graded_performance_factor(60, Sex::Female, 10.0, 2700).unwrap();
        assert!(old > young);
    }

    #[test]
    fn test_zero_time_rejected() {
        let standards = RoadStandards::new();
        assert!(matches!(
            standards.age_graded_performance_factor(30, Sex::Male, 5.0, 0),
            Err(ChampError::ZeroTime(_))
        ));
    }
}
