use serde::Serialize;

use crate::model::{AthleteRecord, Sex};
use crate::scoring::Championship;

/// One line of the overall leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingRow {
    pub position: usize,
    pub name: String,
    pub sex: Sex,
    pub category: String,
    pub races: usize,
    pub time_score: u32,
    pub age_grade_score: u32,
    pub total_score: u32,
}

/// Athletes with at least one counting race, highest total first. Equal
/// totals keep roster order and share a position.
pub fn overall_standings(champs: &Championship, sex: Option<Sex>) -> Vec<StandingRow> {
    let store = champs.store();
    let mut ranked: Vec<&AthleteRecord> = champs
        .athletes()
        .iter()
        .filter(|a| !a.counting_races.is_empty())
        .filter(|a| sex.is_none_or(|s| a.sex == s))
        .collect();
    ranked.sort_by(|a, b| b.total_score(store).cmp(&a.total_score(store)));

    ranked
        .iter()
        .map(|athlete| StandingRow {
            position: position_among(champs, athlete, ranked.iter().copied()).0,
            name: athlete.name.clone(),
            sex: athlete.sex,
            category: athlete.age_category(champs.as_of()),
            races: athlete.counting_races.len(),
            time_score: athlete.time_score(store),
            age_grade_score: athlete.age_grade_score(store),
            total_score: athlete.total_score(store),
        })
        .collect()
}

/// `(position, group size)` of `athlete` within `group`: one more than the
/// number of athletes with a strictly greater total.
pub fn position_among<'a>(
    champs: &Championship,
    athlete: &AthleteRecord,
    group: impl IntoIterator<Item = &'a AthleteRecord>,
) -> (usize, usize) {
    let store = champs.store();
    let own = athlete.total_score(store);
    let mut ahead = 0;
    let mut size = 0;
    for other in group {
        size += 1;
        if other.total_score(store) > own {
            ahead += 1;
        }
    }
    (ahead + 1, size)
}

/// Positions reported on an athlete's page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Positions {
    pub overall: (usize, usize),
    pub sex: (usize, usize),
    pub category: (usize, usize),
}

/// Position overall, among the same sex, and among the same sex and age
/// category. Groups include every athlete on the roster.
pub fn positions(champs: &Championship, athlete: &AthleteRecord) -> Positions {
    let as_of = champs.as_of();
    let category = athlete.age_category(as_of);
    let all = champs.athletes();

    Positions {
        overall: position_among(champs, athlete, all),
        sex: position_among(champs, athlete, all.iter().filter(|a| a.sex == athlete.sex)),
        category: position_among(
            champs,
            athlete,
            all.iter()
                .filter(|a| a.sex == athlete.sex && a.age_category(as_of) == category),
        ),
    }
}

pub fn format_position((position, size): (usize, usize)) -> String {
    format!("{} out of {}", position, size)
}
