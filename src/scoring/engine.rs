use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::config::ScoringConfig;
use crate::age_grade::AgeGrader;
use crate::error::{ChampError, Result};
use crate::model::{
    AthleteRecord, BestResult, RaceKind, RaceListing, RaceResult, RaceStatus, RaceTable,
    ResultId, ResultRow, ResultStore, RosterEntry, MARATHON_KM,
};
use crate::parse::slug;

pub const COMBINED_5K_NAME: &str = "Combined best 5k";
pub const COMBINED_MARATHON_NAME: &str = "Combined best marathon";

/// Loading phase of a championship run.
///
/// Athletes are added first, then races; completed club races are scored as
/// they load. [`ChampionshipBuilder::finish`] scores the combined
/// leaderboards and selects every athlete's counting races, in that order.
pub struct ChampionshipBuilder<'g> {
    scoring: ScoringConfig,
    grader: &'g dyn AgeGrader,
    as_of: NaiveDate,
    store: ResultStore,
    athletes: Vec<AthleteRecord>,
    athlete_index: HashMap<String, usize>,
    races: Vec<RaceTable>,
    race_index: HashMap<String, usize>,
    /// Page slug to the race or athlete name that owns it.
    race_slugs: HashMap<String, String>,
    athlete_slugs: HashMap<String, String>,
}

impl<'g> ChampionshipBuilder<'g> {
    pub fn new(scoring: ScoringConfig, grader: &'g dyn AgeGrader, as_of: NaiveDate) -> Self {
        Self {
            scoring,
            grader,
            as_of,
            store: ResultStore::new(),
            athletes: Vec::new(),
            athlete_index: HashMap::new(),
            races: Vec::new(),
            race_index: HashMap::new(),
            race_slugs: [COMBINED_5K_NAME, COMBINED_MARATHON_NAME]
                .into_iter()
                .map(|name| (slug(name), name.to_string()))
                .collect(),
            athlete_slugs: HashMap::new(),
        }
    }

    /// Register a roster entry. A repeated name replaces the earlier record
    /// in its original position.
    pub fn add_athlete(&mut self, entry: &RosterEntry) {
        let name = entry.full_name();
        let record = AthleteRecord::new(name.clone(), entry.dob, entry.sex);

        match self.athlete_slugs.get(&slug(&name)) {
            Some(owner) if *owner != name => {
                warn!("{} and {} share a page name, only one athlete page will be kept", owner, name);
            }
            Some(_) => {}
            None => {
                self.athlete_slugs.insert(slug(&name), name.clone());
            }
        }

        if let Some(&index) = self.athlete_index.get(&name) {
            warn!("{} appears more than once in the athlete list, keeping the last entry", name);
            self.athletes[index] = record;
        } else {
            self.athlete_index.insert(name, self.athletes.len());
            self.athletes.push(record);
        }
    }

    /// Register a race. `load_results` is only called for completed races.
    ///
    /// Race names must stay distinct once slugged, and must not take the
    /// page of a combined leaderboard.
    pub fn add_race<F>(&mut self, listing: RaceListing, load_results: F) -> Result<()>
    where
        F: FnOnce(&RaceListing) -> Result<Vec<ResultRow>>,
    {
        let page = slug(&listing.name);
        if let Some(owner) = self.race_slugs.get(&page) {
            return Err(ChampError::DuplicateRace {
                name: listing.name,
                existing: owner.clone(),
            });
        }

        let status = RaceStatus::on(listing.date, self.as_of);
        let mut race = RaceTable::new(
            listing.name.clone(),
            listing.source.clone(),
            listing.date,
            listing.distance_km,
            listing.kind,
            status,
        );

        if status.is_completed() {
            for row in load_results(&listing)? {
                let Some(&index) = self.athlete_index.get(&row.athlete) else {
                    warn!("{} not matched in {}, check athlete list", row.athlete, race.name);
                    continue;
                };
                let athlete = &mut self.athletes[index];
                let result = RaceResult::new(
                    race.name.clone(),
                    athlete.name.clone(),
                    race.date,
                    row.time_secs,
                    race.distance_km,
                    athlete.sex,
                    race.kind,
                );
                let id = athlete.add_result(result, &mut self.store, self.grader)?;
                race.entries.push(id);
            }

            if race.is_club() {
                race.assign_scores(&mut self.store, self.scoring.max_points());
            }
            info!("Loaded {} ({} runners)", race.name, race.entries.len());
        } else {
            debug!("{} on {} is upcoming, no results loaded", race.name, race.date);
        }

        self.race_slugs.insert(page, race.name.clone());
        self.race_index.insert(race.name.clone(), self.races.len());
        self.races.push(race);
        Ok(())
    }

    /// Score the combined leaderboards, then select counting races.
    pub fn finish(mut self) -> Championship {
        let max_points = self.scoring.max_points();

        let combined_5k = self.combined(COMBINED_5K_NAME, 5.0, RaceKind::FiveK, |a| a.best_5k);
        combined_5k.assign_scores(&mut self.store, max_points);

        let combined_marathon = self.combined(
            COMBINED_MARATHON_NAME,
            MARATHON_KM,
            RaceKind::Marathon,
            |a| a.best_marathon,
        );
        combined_marathon.assign_scores(&mut self.store, max_points);

        let mut championship = Championship {
            scoring: self.scoring,
            as_of: self.as_of,
            store: self.store,
            athletes: self.athletes,
            athlete_index: self.athlete_index,
            races: self.races,
            race_index: self.race_index,
            combined_5k,
            combined_marathon,
        };
        championship.select_counting_races();
        championship
    }

    fn combined(
        &self,
        name: &str,
        distance_km: f64,
        kind: RaceKind,
        best: impl Fn(&AthleteRecord) -> BestResult,
    ) -> RaceTable {
        let mut race = RaceTable::new(name, "", self.as_of, distance_km, kind, RaceStatus::Completed);
        race.entries = self.athletes.iter().filter_map(|a| best(a).id()).collect();
        race
    }
}

/// A fully scored championship.
#[derive(Debug, Clone)]
pub struct Championship {
    scoring: ScoringConfig,
    as_of: NaiveDate,
    store: ResultStore,
    athletes: Vec<AthleteRecord>,
    athlete_index: HashMap<String, usize>,
    races: Vec<RaceTable>,
    race_index: HashMap<String, usize>,
    combined_5k: RaceTable,
    combined_marathon: RaceTable,
}

impl Championship {
    fn select_counting_races(&mut self) {
        let total_races = self.scoring.total_races();
        for athlete in &mut self.athletes {
            athlete.select_counting_races(&self.store, total_races);
        }
        debug!("Selected counting races for {} athletes", self.athletes.len());
    }

    /// Reference date for race status and age categories.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn result(&self, id: ResultId) -> &RaceResult {
        self.store.get(id)
    }

    /// Athletes in roster order.
    pub fn athletes(&self) -> &[AthleteRecord] {
        &self.athletes
    }

    pub fn athlete(&self, name: &str) -> Option<&AthleteRecord> {
        self.athlete_index.get(name).map(|&i| &self.athletes[i])
    }

    /// Races in race-list order.
    pub fn races(&self) -> &[RaceTable] {
        &self.races
    }

    pub fn race(&self, name: &str) -> Option<&RaceTable> {
        self.race_index.get(name).map(|&i| &self.races[i])
    }

    pub fn combined_5k(&self) -> &RaceTable {
        &self.combined_5k
    }

    pub fn combined_marathon(&self) -> &RaceTable {
        &self.combined_marathon
    }

    /// Whether `id` counts toward its athlete's total.
    pub fn counts(&self, id: ResultId) -> bool {
        self.athlete(&self.result(id).athlete)
            .is_some_and(|athlete| athlete.counts(id))
    }
}
