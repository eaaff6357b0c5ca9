//! Age-grading factors read from a CSV table.
//!
//! The layout mirrors the published WMA road tables:
//!
//! ```text
//! sex,age,5 km,10 km,10 mi,42.195 km
//! M,OC,769,1603,2665,7377
//! M,35,0.9881,0.9874,0.9866,0.9837
//! ...
//! F,OC,...
//! ```
//!
//! Distance columns are written like the race list and must ascend. Each
//! sex has one `OC` row of open-class standards in seconds and one row of
//! age factors per listed age. Ages between rows are interpolated
//! linearly; distances between columns on a log scale.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use super::{log_weight, AgeGrader};
use crate::error::{ChampError, Result};
use crate::model::Sex;
use crate::parse::{parse_distance, parse_sex};

const OPEN_CLASS: &str = "OC";

#[derive(Debug, Default)]
struct SexTable {
    open: Vec<f64>,
    factors: BTreeMap<u32, Vec<f64>>,
}

impl SexTable {
    fn factors_at(&self, age: u32) -> Result<Vec<f64>> {
        let below = self.factors.range(..=age).next_back();
        let above = self.factors.range(age..).next();
        match (below, above) {
            (Some((&lo_age, lo)), Some((&hi_age, _))) if lo_age == hi_age => Ok(lo.clone()),
            (Some((&lo_age, lo)), Some((&hi_age, hi))) => {
                let w = f64::from(age - lo_age) / f64::from(hi_age - lo_age);
                Ok(lo.iter().zip(hi).map(|(a, b)| a + w * (b - a)).collect())
            }
            _ => Err(ChampError::AgeOutOfRange(age)),
        }
    }
}

#[derive(Debug)]
pub struct FactorTable {
    distances: Vec<f64>,
    male: SexTable,
    female: SexTable,
}

impl FactorTable {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| ChampError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_reader(file, &path.display().to_string())?;
        debug!(
            "Loaded age-grading table {} ({} distances)",
            path.display(),
            table.distances.len()
        );
        Ok(table)
    }

    /// Parse a table; `origin` names the source in errors.
    pub fn from_reader<R: Read>(reader: R, origin: &str) -> Result<Self> {
        let invalid = |reason: String| ChampError::InvalidFactorTable {
            path: origin.to_string(),
            reason,
        };
        let csv_err = |source: csv::Error| ChampError::Csv {
            path: origin.to_string(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(csv_err)?.clone();
        if headers.len() < 3 {
            return Err(invalid("expected sex, age and at least one distance column".to_string()));
        }
        let distances = headers
            .iter()
            .skip(2)
            .map(parse_distance)
            .collect::<Result<Vec<f64>>>()?;
        if distances.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(invalid("distance columns must ascend".to_string()));
        }

        let mut male = SexTable::default();
        let mut female = SexTable::default();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(csv_err)?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            // header is line 1
            let line = index + 2;

            let table = match parse_sex(record.get(0).unwrap_or_default())? {
                Sex::Male => &mut male,
                Sex::Female => &mut female,
            };
            let values = record
                .iter()
                .skip(2)
                .map(|value| value.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0))
                .collect::<Option<Vec<f64>>>()
                .ok_or_else(|| invalid(format!("line {}: values must be positive numbers", line)))?;
            if values.len() != distances.len() {
                return Err(invalid(format!(
                    "line {}: expected {} values, found {}",
                    line,
                    distances.len(),
                    values.len()
                )));
            }

            let age = record.get(1).unwrap_or_default();
            if age.eq_ignore_ascii_case(OPEN_CLASS) {
                table.open = values;
            } else {
                let age = age
                    .parse::<u32>()
                    .map_err(|_| invalid(format!("line {}: '{}' is not an age", line, age)))?;
                table.factors.insert(age, values);
            }
        }

        for (sex, table) in [(Sex::Male, &male), (Sex::Female, &female)] {
            if table.open.is_empty() {
                return Err(invalid(format!("no {} open-class row", sex.label())));
            }
            if table.factors.is_empty() {
                return Err(invalid(format!("no {} age rows", sex.label())));
            }
        }

        Ok(Self { distances, male, female })
    }

    fn for_sex(&self, sex: Sex) -> &SexTable {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }

    /// Columns either side of `distance_km` and its log-scale weight between them.
    fn bracket(&self, distance_km: f64) -> Result<(usize, usize, f64)> {
        let out_of_range = || ChampError::DistanceOutOfRange(distance_km);
        if !distance_km.is_finite() {
            return Err(out_of_range());
        }
        if let Some(exact) = self.distances.iter().position(|d| (d - distance_km).abs() < 1e-9) {
            return Ok((exact, exact, 0.0));
        }
        let upper = self
            .distances
            .iter()
            .position(|d| *d > distance_km)
            .filter(|upper| *upper > 0)
            .ok_or_else(out_of_range)?;
        let lower = upper - 1;
        let w = log_weight(distance_km, self.distances[lower], self.distances[upper]);
        Ok((lower, upper, w))
    }

    /// Open-class standard in seconds, interpolated log-log between columns.
    pub fn open_standard(&self, sex: Sex, distance_km: f64) -> Result<f64> {
        let (lower, upper, w) = self.bracket(distance_km)?;
        let open = &self.for_sex(sex).open;
        Ok((open[lower].ln() + w * (open[upper].ln() - open[lower].ln())).exp())
    }

    pub fn age_factor(&self, sex: Sex, age: u32, distance_km: f64) -> Result<f64> {
        let (lower, upper, w) = self.bracket(distance_km)?;
        let factors = self.for_sex(sex).factors_at(age)?;
        Ok(factors[lower] + w * (factors[upper] - factors[lower]))
    }
}

impl AgeGrader for FactorTable {
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
        let factor = self.age_factor(sex, age, distance_km)?;
        Ok(open / (factor * f64::from(time_secs)))
    }
}
