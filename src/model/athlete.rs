use chrono::NaiveDate;

use super::result::{RaceResult, ResultId, ResultStore, Sex};
use crate::age_grade::{compute_age_grade, AgeGrader};
use crate::error::Result;
use crate::parse::years_since;

/// An athlete's best result of one kind, if they have run one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BestResult {
    Present(ResultId),
    #[default]
    Absent,
}

impl BestResult {
    pub fn id(&self) -> Option<ResultId> {
        match self {
            BestResult::Present(id) => Some(*id),
            BestResult::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, BestResult::Present(_))
    }

    /// Score carried into selection; an absent best scores nothing.
    pub fn total_score(&self, store: &ResultStore) -> u32 {
        self.id().map_or(0, |id| store.get(id).total_score())
    }

    /// Replace the held result if `candidate` is strictly faster.
    fn offer(&mut self, candidate: ResultId, store: &ResultStore) {
        let faster = match self {
            BestResult::Absent => true,
            BestResult::Present(current) => {
                store.get(candidate).time_secs < store.get(*current).time_secs
            }
        };
        if faster {
            *self = BestResult::Present(candidate);
        }
    }
}

/// A championship participant and their season.
#[derive(Debug, Clone)]
pub struct AthleteRecord {
    pub name: String,
    pub dob: NaiveDate,
    pub sex: Sex,
    pub results: Vec<ResultId>,
    pub best_5k: BestResult,
    pub best_marathon: BestResult,
    pub counting_races: Vec<ResultId>,
}

impl AthleteRecord {
    pub fn new(name: impl Into<String>, dob: NaiveDate, sex: Sex) -> Self {
        Self {
            name: name.into(),
            dob,
            sex,
            results: Vec::new(),
            best_5k: BestResult::Absent,
            best_marathon: BestResult::Absent,
            counting_races: Vec::new(),
        }
    }

    /// Age-grade `result`, store it and record it against this athlete,
    /// updating the best 5k or marathon when it is strictly faster.
    pub fn add_result(
        &mut self,
        mut result: RaceResult,
        store: &mut ResultStore,
        grader: &dyn AgeGrader,
    ) -> Result<ResultId> {
        compute_age_grade(&mut result, self.dob, grader)?;
        let kind = result.kind;
        let id = store.insert(result);
        self.results.push(id);

        if kind.is_5k() {
            self.best_5k.offer(id, store);
        }
        if kind.is_marathon() {
            self.best_marathon.offer(id, store);
        }
        Ok(id)
    }

    pub fn nominated_results(&self, store: &ResultStore) -> Vec<ResultId> {
        self.results_where(store, |r| r.kind.is_nominated())
    }

    pub fn five_k_results(&self, store: &ResultStore) -> Vec<ResultId> {
        self.results_where(store, |r| r.kind.is_5k())
    }

    pub fn marathon_results(&self, store: &ResultStore) -> Vec<ResultId> {
        self.results_where(store, |r| r.kind.is_marathon())
    }

    fn results_where(&self, store: &ResultStore, keep: impl Fn(&RaceResult) -> bool) -> Vec<ResultId> {
        self.results
            .iter()
            .copied()
            .filter(|id| keep(store.get(*id)))
            .collect()
    }

    /// Best 5k and best marathon, higher total score first. The 5k leads on
    /// a tie.
    pub fn required_races(&self, store: &ResultStore) -> (BestResult, BestResult) {
        if self.best_5k.total_score(store) >= self.best_marathon.total_score(store) {
            (self.best_5k, self.best_marathon)
        } else {
            (self.best_marathon, self.best_5k)
        }
    }

    /// Rebuild `counting_races` from the fully scored results.
    ///
    /// The stronger of best 5k / best marathon always counts. Only the top
    /// `total_races - 1` club results are considered, and each must beat the
    /// weaker of the two bests to count. The weaker best then fills the last
    /// place if there is room. Absent bests are dropped at the end.
    pub fn select_counting_races(&mut self, store: &ResultStore, total_races: usize) {
        let mut by_score = self.nominated_results(store);
        by_score.sort_by(|a, b| store.get(*b).total_score().cmp(&store.get(*a).total_score()));

        let (primary, secondary) = self.required_races(store);
        let floor = secondary.total_score(store);

        let mut counting: Vec<BestResult> = vec![primary];
        counting.extend(
            by_score
                .into_iter()
                .take(total_races.saturating_sub(1))
                .filter(|id| store.get(*id).total_score() > floor)
                .map(BestResult::Present),
        );

        if counting.len() < total_races {
            counting.push(secondary);
        }

        self.counting_races = counting.iter().filter_map(BestResult::id).collect();
    }

    pub fn counts(&self, id: ResultId) -> bool {
        self.counting_races.contains(&id)
    }

    pub fn time_score(&self, store: &ResultStore) -> u32 {
        self.counting_races.iter().map(|id| store.get(*id).time_score).sum()
    }

    pub fn age_grade_score(&self, store: &ResultStore) -> u32 {
        self.counting_races.iter().map(|id| store.get(*id).age_grade_score).sum()
    }

    pub fn total_score(&self, store: &ResultStore) -> u32 {
        self.counting_races.iter().map(|id| store.get(*id).total_score()).sum()
    }

    pub fn age_on(&self, date: NaiveDate) -> u32 {
        years_since(self.dob, date)
    }

    /// U17, U20, Senior, then five-year veteran bands (V35, V40, ...).
    pub fn age_category(&self, as_of: NaiveDate) -> String {
        match self.age_on(as_of) {
            age if age < 17 => "U17".to_string(),
            age if age < 20 => "U20".to_string(),
            age if age < 35 => "Senior".to_string(),
            age => format!("V{}", 5 * (age / 5)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::age_grade::testing::FlatGrader;
    use crate::model::RaceKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn athlete() -> AthleteRecord {
        AthleteRecord::new("Jo Bloggs", date(1990, 3, 10), Sex::Male)
    }

    /// Insert a result with preset scores, bypassing race scoring.
    fn scored(
        athlete: &mut AthleteRecord,
        store: &mut ResultStore,
        race: &str,
        kind: RaceKind,
        time_secs: u32,
        total: u32,
    ) -> ResultId {
        let grader = FlatGrader { standard_secs: 1000.0 };
        let result = RaceResult::new(race, &athlete.name, date(2025, 7, 1), time_secs, 10.0, athlete.sex, kind);
        let id = athlete.add_result(result, store, &grader).unwrap();
        let result = store.get_mut(id);
        result.time_score = total / 2;
        result.age_grade_score = total - total / 2;
        id
    }

    #[test]
    fn test_add_result_age_grades_and_tracks_bests() {
        let mut store = ResultStore::new();
        let mut athlete = athlete();
        let grader = FlatGrader { standard_secs: 900.0 };

        let slow = RaceResult::new("Parkrun A", &athlete.name, date(2025, 7, 1), 1200, 5.0, Sex::Male, RaceKind::FiveK);
        let slow_id = athlete.add_result(slow, &mut store, &grader).unwrap();
        assert_eq!(athlete.best_5k, BestResult::Present(slow_id));
        assert_eq!(store.get(slow_id).age_grade_percent, Some(75.0));

        let fast = RaceResult::new("Parkrun B", &athlete.name, date(2025, 8, 1), 1100, 5.0, Sex::Male, RaceKind::FiveK);
        let fast_id = athlete.add_result(fast, &mut store, &grader).unwrap();
        assert_eq!(athlete.best_5k, BestResult::Present(fast_id));

        let equal = RaceResult::new("Parkrun C", &athlete.name, date(2025, 9, 1), 1100, 5.0, Sex::Male, RaceKind::FiveK);
        athlete.add_result(equal, &mut store, &grader).unwrap();
        assert_eq!(athlete.best_5k, BestResult::Present(fast_id));

        assert_eq!(athlete.best_marathon, BestResult::Absent);
        assert_eq!(athlete.results.len(), 3);
        assert_eq!(athlete.five_k_results(&store).len(), 3);
        assert!(athlete.nominated_results(&store).is_empty());
    }

    #[test]
    fn test_required_races_order() {
        let mut store = ResultStore::new();
        let mut athlete = athlete();
        let five_k = scored(&mut athlete, &mut store, "5k", RaceKind::FiveK, 1200, 30);
        let marathon = scored(&mut athlete, &mut store, "Marathon", RaceKind::Marathon, 11_000, 40);

        assert_eq!(
            athlete.required_races(&store),
            (BestResult::Present(marathon), BestResult::Present(five_k))
        );

        store.get_mut(five_k).time_score = 25;
        store.get_mut(five_k).age_grade_score = 15;
        assert_eq!(
            athlete.required_races(&store),
            (BestResult::Present(five_k), BestResult::Present(marathon))
        );
    }

    #[test]
    fn test_selection_documented_scenario() {
        let mut store = ResultStore::new();
        let mut athlete = athlete();
        let best_5k = scored(&mut athlete, &mut store, "5k", RaceKind::FiveK, 1200, 40);
        let best_marathon = scored(&mut athlete, &mut store, "Marathon", RaceKind::Marathon, 11_000, 30);
        let club: Vec<ResultId> = [45, 42, 38, 20, 15, 10, 5]
            .iter()
            .enumerate()
            .map(|(i, total)| scored(&mut athlete, &mut store, &format!("Club {}", i), RaceKind::Club, 2400, *total))
            .collect();

        athlete.select_counting_races(&store, 6);

        assert_eq!(
            athlete.counting_races,
            vec![best_5k, club[0], club[1], club[2], best_marathon]
        );
        assert_eq!(athlete.total_score(&store), 40 + 45 + 42 + 38 + 30);
    }

    #[test]
    fn test_selection_caps_at_total_races() {
        let mut store = ResultStore::new();
        let mut athlete = athlete();
        let best_5k = scored(&mut athlete, &mut store, "5k", RaceKind::FiveK, 1200, 20);
        scored(&mut athlete, &mut store, "Marathon", RaceKind::Marathon, 11_000, 10);
        for (i, total) in [50, 49, 48, 47, 46, 45].iter().enumerate() {
            scored(&mut athlete, &mut store, &format!("Club {}", i), RaceKind::Club, 2400, *total);
        }

        athlete.select_counting_races(&store, 6);

        assert_eq!(athlete.counting_races.len(), 6);
        assert_eq!(athlete.counting_races[0], best_5k);
        let totals: Vec<u32> = athlete.counting_races[1..]
            .iter()
            .map(|id| store.get(*id).total_score())
            .collect();
        assert_eq!(totals, vec![50, 49, 48, 47, 46]);
    }

    #[test]
    fn test_selection_floor_must_be_strictly_beaten() {
        let mut store = ResultStore::new();
        let mut athlete = athlete();
        scored(&mut athlete, &mut store, "5k", RaceKind::FiveK, 1200, 40);
        let marathon = scored(&mut athlete, &mut store, "Marathon", RaceKind::Marathon, 11_000, 30);
        let equal = scored(&mut athlete, &mut store, "Club equal", RaceKind::Club, 2400, 30);

        athlete.select_counting_races(&store, 6);

        assert!(!athlete.counts(equal));
        assert!(athlete.counts(marathon));
        assert_eq!(athlete.counting_races.len(), 2);
    }

    #[test]
    fn test_selection_without_bests_drops_absent() {
        let mut store = ResultStore::new();
        let mut athlete = athlete();
        let a = scored(&mut athlete, &mut store, "Club A", RaceKind::Club, 2400, 12);
        let b = scored(&mut athlete, &mut store, "Club B", RaceKind::Club, 2400, 30);
        let zero = scored(&mut athlete, &mut store, "Club C", RaceKind::Club, 2400, 0);

        athlete.select_counting_races(&store, 6);

        assert_eq!(athlete.counting_races, vec![b, a]);
        assert!(!athlete.counts(zero));
    }

    #[test]
    fn test_selection_only_marathon() {
        let mut store = ResultStore::new();
        let mut athlete = athlete();
        let marathon = scored(&mut athlete, &mut store, "Marathon", RaceKind::Marathon, 11_000, 18);
        let club = scored(&mut athlete, &mut store, "Club", RaceKind::Club, 2400, 5);

        athlete.select_counting_races(&store, 6);

        // The absent 5k is the floor, so any scoring club race counts.
        assert_eq!(athlete.counting_races, vec![marathon, club]);
    }

    #[test]
    fn test_selection_single_race_cap() {
        let mut store = ResultStore::new();
        let mut athlete = athlete();
        let five_k = scored(&mut athlete, &mut store, "5k", RaceKind::FiveK, 1200, 10);
        scored(&mut athlete, &mut store, "Marathon", RaceKind::Marathon, 11_000, 5);
        scored(&mut athlete, &mut store, "Club", RaceKind::Club, 2400, 50);

        athlete.select_counting_races(&store, 1);

        assert_eq!(athlete.counting_races, vec![five_k]);
    }

    #[test]
    fn test_selection_is_idempotent() {
        let mut store = ResultStore::new();
        let mut athlete = athlete();
        scored(&mut athlete, &mut store, "5k", RaceKind::FiveK, 1200, 33);
        scored(&mut athlete, &mut store, "Marathon", RaceKind::Marathon, 11_000, 21);
        for (i, total) in [40, 22, 21, 35].iter().enumerate() {
            scored(&mut athlete, &mut store, &format!("Club {}", i), RaceKind::Club, 2400, *total);
        }

        athlete.select_counting_races(&store, 6);
        let first = athlete.counting_races.clone();
        athlete.select_counting_races(&store, 6);

        assert_eq!(athlete.counting_races, first);
    }

    #[test]
    fn test_score_sums_over_counting_races() {
        let mut store = ResultStore::new();
        let mut athlete = athlete();
        let five_k = scored(&mut athlete, &mut store, "5k", RaceKind::FiveK, 1200, 40);
        let club = scored(&mut athlete, &mut store, "Club", RaceKind::Club, 2400, 41);

        athlete.select_counting_races(&store, 6);

        let time: u32 = [five_k, club].iter().map(|id| store.get(*id).time_score).sum();
        let age: u32 = [five_k, club].iter().map(|id| store.get(*id).age_grade_score).sum();
        assert_eq!(athlete.time_score(&store), time);
        assert_eq!(athlete.age_grade_score(&store), age);
        assert_eq!(athlete.total_score(&store), 81);
    }

    #[test]
    fn test_age_category() {
        let athlete = AthleteRecord::new("Jo Bloggs", date(1980, 6, 15), Sex::Female);
        assert_eq!(athlete.age_category(date(1996, 6, 14)), "U17");
        assert_eq!(athlete.age_category(date(1997, 6, 15)), "U20");
        assert_eq!(athlete.age_category(date(2000, 6, 15)), "Senior");
        assert_eq!(athlete.age_category(date(2015, 6, 14)), "Senior");
        assert_eq!(athlete.age_category(date(2015, 6, 15)), "V35");
        assert_eq!(athlete.age_category(date(2025, 6, 15)), "V45");
        assert_eq!(athlete.age_category(date(2029, 6, 14)), "V45");
    }
}
