use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::debug;

use super::result::{RaceKind, ResultId, ResultStore, Sex};

/// Whether a race has been run by the reference date. Only completed races
/// have results to load and score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceStatus {
    Completed,
    Upcoming,
}

impl RaceStatus {
    /// A race dated on or before `as_of` is completed.
    pub fn on(race_date: NaiveDate, as_of: NaiveDate) -> Self {
        if race_date <= as_of {
            RaceStatus::Completed
        } else {
            RaceStatus::Upcoming
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RaceStatus::Completed)
    }
}

/// One scored competition: a real race or one of the combined leaderboards.
#[derive(Debug, Clone)]
pub struct RaceTable {
    pub name: String,
    /// Result file for completed races, entries link for upcoming ones.
    pub source: String,
    pub date: NaiveDate,
    pub distance_km: f64,
    pub kind: RaceKind,
    pub status: RaceStatus,
    pub entries: Vec<ResultId>,
}

impl RaceTable {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        date: NaiveDate,
        distance_km: f64,
        kind: RaceKind,
        status: RaceStatus,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            date,
            distance_km,
            kind,
            status,
            entries: Vec::new(),
        }
    }

    pub fn is_club(&self) -> bool {
        self.kind.is_nominated()
    }

    /// Assign ordinal points to every entry.
    ///
    /// Time points are ranked within each sex by ascending time, age-grade
    /// points across the whole field by descending age-grade percent. Rank
    /// `r` (0-based) earns `max_points - r`, floored at zero. Equal times or
    /// percents keep entry order.
    pub fn assign_scores(&self, store: &mut ResultStore, max_points: u32) {
        for sex in [Sex::Male, Sex::Female] {
            let mut by_time: Vec<ResultId> = self
                .entries
                .iter()
                .copied()
                .filter(|id| store.get(*id).sex == sex)
                .collect();
            by_time.sort_by_key(|id| store.get(*id).time_secs);

            for (rank, id) in by_time.into_iter().enumerate() {
                store.get_mut(id).time_score = rank_points(rank, max_points);
            }
        }

        let mut by_age_grade = self.entries.clone();
        by_age_grade.sort_by(|a, b| {
            compare_age_grade_desc(
                store.get(*a).age_grade_percent,
                store.get(*b).age_grade_percent,
            )
        });
        for (rank, id) in by_age_grade.into_iter().enumerate() {
            store.get_mut(id).age_grade_score = rank_points(rank, max_points);
        }

        debug!("Scored {} ({} results)", self.name, self.entries.len());
    }

    /// Entries ordered by finishing time, fastest first.
    pub fn entries_by_time(&self, store: &ResultStore) -> Vec<ResultId> {
        let mut ids = self.entries.clone();
        ids.sort_by_key(|id| store.get(*id).time_secs);
        ids
    }
}

pub fn rank_points(rank: usize, max_points: u32) -> u32 {
    u32::try_from(rank)
        .map(|rank| max_points.saturating_sub(rank))
        .unwrap_or(0)
}

/// Higher percent first; results without an age grade sort last.
fn compare_age_grade_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RaceResult;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn add(
        race: &mut RaceTable,
        store: &mut ResultStore,
        athlete: &str,
        sex: Sex,
        time_secs: u32,
        pct: f64,
    ) -> ResultId {
        let mut result = RaceResult::new(&race.name, athlete, race.date, time_secs, race.distance_km, sex, race.kind);
        result.age_grade_percent = Some(pct);
        let id = store.insert(result);
        race.entries.push(id);
        id
    }

    fn club_race() -> RaceTable {
        RaceTable::new("Club 5 mile", "results/club5.csv", date(), 8.0467, RaceKind::Club, RaceStatus::Completed)
    }

    #[test]
    fn test_rank_points() {
        assert_eq!(rank_points(0, 25), 25);
        assert_eq!(rank_points(1, 25), 24);
        assert_eq!(rank_points(24, 25), 1);
        assert_eq!(rank_points(25, 25), 0);
        assert_eq!(rank_points(300, 25), 0);
    }

    #[test]
    fn test_status_on_dates() {
        let race_day = date();
        assert_eq!(RaceStatus::on(race_day, race_day), RaceStatus::Completed);
        assert_eq!(RaceStatus::on(race_day, race_day.pred_opt().unwrap()), RaceStatus::Upcoming);
        assert!(RaceStatus::on(race_day, race_day.succ_opt().unwrap()).is_completed());
    }

    #[test]
    fn test_time_scores_ranked_within_sex() {
        let mut store = ResultStore::new();
        let mut race = club_race();
        let m_slow = add(&mut race, &mut store, "M Slow", Sex::Male, 3000, 60.0);
        let f_fast = add(&mut race, &mut store, "F Fast", Sex::Female, 2900, 70.0);
        let m_fast = add(&mut race, &mut store, "M Fast", Sex::Male, 2800, 65.0);
        let f_slow = add(&mut race, &mut store, "F Slow", Sex::Female, 3100, 55.0);

        race.assign_scores(&mut store, 25);

        assert_eq!(store.get(m_fast).time_score, 25);
        assert_eq!(store.get(m_slow).time_score, 24);
        assert_eq!(store.get(f_fast).time_score, 25);
        assert_eq!(store.get(f_slow).time_score, 24);
    }

    #[test]
    fn test_age_grade_scores_ranked_across_field() {
        let mut store = ResultStore::new();
        let mut race = club_race();
        let a = add(&mut race, &mut store, "A", Sex::Male, 3000, 60.0);
        let b = add(&mut race, &mut store, "B", Sex::Female, 2900, 70.0);
        let c = add(&mut race, &mut store, "C", Sex::Male, 2800, 65.0);

        race.assign_scores(&mut store, 25);

        assert_eq!(store.get(b).age_grade_score, 25);
        assert_eq!(store.get(c).age_grade_score, 24);
        assert_eq!(store.get(a).age_grade_score, 23);
        assert_eq!(store.get(c).total_score(), 25 + 24);
    }

    #[test]
    fn test_scores_floor_at_zero_in_large_field() {
        let mut store = ResultStore::new();
        let mut race = club_race();
        let ids: Vec<ResultId> = (0..30)
            .map(|i| add(&mut race, &mut store, &format!("Runner {}", i), Sex::Male, 2000 + i, 80.0 - i as f64))
            .collect();

        race.assign_scores(&mut store, 25);

        for (rank, id) in ids.iter().enumerate() {
            let expected = 25u32.saturating_sub(rank as u32);
            let result = store.get(*id);
            assert_eq!(result.time_score, expected);
            assert_eq!(result.age_grade_score, expected);
            assert!(result.time_score <= 25);
        }
        assert_eq!(store.get(ids[25]).total_score(), 0);
        assert_eq!(store.get(ids[29]).total_score(), 0);
    }

    #[test]
    fn test_ties_keep_entry_order() {
        let mut store = ResultStore::new();
        let mut race = club_race();
        let first = add(&mut race, &mut store, "First", Sex::Female, 2500, 70.0);
        let second = add(&mut race, &mut store, "Second", Sex::Female, 2500, 70.0);

        race.assign_scores(&mut store, 25);

        assert_eq!(store.get(first).time_score, 25);
        assert_eq!(store.get(second).time_score, 24);
        assert_eq!(store.get(first).age_grade_score, 25);
        assert_eq!(store.get(second).age_grade_score, 24);
    }

    #[test]
    fn test_missing_age_grade_ranks_last() {
        let mut store = ResultStore::new();
        let mut race = club_race();
        let graded = add(&mut race, &mut store, "Graded", Sex::Male, 2500, 50.0);
        let ungraded = store.insert(RaceResult::new(&race.name, "Ungraded", race.date, 2400, race.distance_km, Sex::Male, race.kind));
        race.entries.insert(0, ungraded);

        race.assign_scores(&mut store, 25);

        assert_eq!(store.get(graded).age_grade_score, 25);
        assert_eq!(store.get(ungraded).age_grade_score, 24);
    }

    #[test]
    fn test_rescoring_is_stable() {
        let mut store = ResultStore::new();
        let mut race = club_race();
        let a = add(&mut race, &mut store, "A", Sex::Male, 3000, 60.0);
        let b = add(&mut race, &mut store, "B", Sex::Male, 2900, 70.0);

        race.assign_scores(&mut store, 25);
        let before = (store.get(a).clone(), store.get(b).clone());
        race.assign_scores(&mut store, 25);

        assert_eq!(&before.0, store.get(a));
        assert_eq!(&before.1, store.get(b));
    }

    #[test]
    fn test_entries_by_time() {
        let mut store = ResultStore::new();
        let mut race = club_race();
        let slow = add(&mut race, &mut store, "Slow", Sex::Male, 3000, 60.0);
        let fast = add(&mut race, &mut store, "Fast", Sex::Female, 2000, 70.0);
        assert_eq!(race.entries_by_time(&store), vec![fast, slow]);
    }
}
