use crate::core::awards::SeasonAwards;
use crate::core::headstart::Headstarts;
use crate::core::increment::IncrementSource;
use crate::core::race::{Leaderboard, Race, TickOutcome};
use crate::core::roster::{CompetitorId, Roster};
use crate::core::scoring::points_for_position;
use crate::core::season::SeasonLedger;
use crate::error::RaceError;
use crate::post::race_result::{ClassifiedDriver, RaceResult};
use crate::post::season_report::SeasonReport;
use tracing::{info, warn};

/// Championship bundles everything that lives for one session: the roster, the headstart
/// settings, the race engine, the season ledger and the source of progress increments. The race
/// engine books every completed race into the ledger exactly once, in the tick that completes it.
#[derive(Debug)]
pub struct Championship<I: IncrementSource> {
    roster: Roster,
    headstarts: Headstarts,
    race: Race,
    ledger: SeasonLedger,
    increments: I,
}

impl<I: IncrementSource> Championship<I> {
    pub fn new(roster: Roster, headstarts: Headstarts, increments: I) -> Result<Self, RaceError> {
        if headstarts.len() != roster.no_competitors() {
            return Err(RaceError::InvalidRoster(format!(
                "{} headstarts given for {} drivers",
                headstarts.len(),
                roster.no_competitors()
            )));
        }

        let race = Race::new(&roster);
        let ledger = SeasonLedger::new(&roster);

        Ok(Championship {
            roster,
            headstarts,
            race,
            ledger,
            increments,
        })
    }

    // ---------------------------------------------------------------------------------------------
    // RACE CONTROL --------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// start_race starts a new race using the current headstart settings.
    pub fn start_race(&mut self) -> Result<Leaderboard<'_>, RaceError> {
        self.race.start_race(&self.headstarts)?;
        info!("Race {} started", self.ledger.races_completed() + 1);
        Ok(self.race.current_leaderboard())
    }

    /// tick advances the running race by one step. If this completes the race, its finishing
    /// order is booked into the season ledger.
    pub fn tick(&mut self) -> Result<Leaderboard<'_>, RaceError> {
        if let TickOutcome::Finished = self.race.tick(&mut self.increments)? {
            self.ledger.finalize_race(self.race.get_finish_order());
        }
        Ok(self.race.current_leaderboard())
    }

    /// run_race starts a race and ticks until every driver has finished.
    pub fn run_race(&mut self) -> Result<RaceResult, RaceError> {
        self.start_race()?;
        while self.race.is_active() {
            self.tick()?;
        }
        self.race_result().ok_or(RaceError::NoRaceRunning)
    }

    pub fn current_leaderboard(&self) -> Leaderboard<'_> {
        self.race.current_leaderboard()
    }

    /// abandon_race discards the running race, nothing is booked.
    pub fn abandon_race(&mut self) -> bool {
        self.race.abandon_race()
    }

    // ---------------------------------------------------------------------------------------------
    // CONFIGURATION -------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// set_headstart changes the headstart of a driver. Not allowed while a race is running.
    pub fn set_headstart(&mut self, driver: &str, value: i64) -> Result<(), RaceError> {
        if self.race.is_active() {
            warn!("Rejected headstart change for {} during a race", driver);
            return Err(RaceError::RaceInProgress);
        }

        let result = match self.roster.find_competitor(driver) {
            Some(id) => self.headstarts.set(&self.roster, id, value),
            None => Err(RaceError::UnknownCompetitor(driver.to_owned())),
        };
        if let Err(e) = &result {
            warn!("Rejected headstart change: {}", e);
        }
        result
    }

    pub fn get_headstart(&self, driver: &str) -> Option<u8> {
        self.roster
            .find_competitor(driver)
            .map(|id| self.headstarts.get(id))
    }

    // ---------------------------------------------------------------------------------------------
    // QUERIES -------------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn headstarts(&self) -> &Headstarts {
        &self.headstarts
    }

    pub fn race(&self) -> &Race {
        &self.race
    }

    pub fn ledger(&self) -> &SeasonLedger {
        &self.ledger
    }

    pub fn rating(&self, id: CompetitorId) -> f64 {
        self.ledger.rating(id)
    }

    pub fn awards(&self) -> SeasonAwards {
        SeasonAwards::compute(&self.ledger, &self.roster, &self.headstarts)
    }

    /// race_result returns the classification of the last race once it is finished.
    pub fn race_result(&self) -> Option<RaceResult> {
        if !self.race.is_finished() {
            return None;
        }

        let classification = self
            .race
            .get_finish_order()
            .iter()
            .enumerate()
            .map(|(i, &id)| ClassifiedDriver {
                position: i + 1,
                driver: self.roster.competitor(id).name.to_owned(),
                team: self.roster.team_of(id).name.to_owned(),
                points: points_for_position(i as i64 + 1),
            })
            .collect();

        Some(RaceResult {
            race_no: self.ledger.races_completed(),
            no_ticks: self.race.get_cur_tick(),
            classification,
        })
    }

    pub fn season_report(&self) -> SeasonReport {
        SeasonReport::new(&self.ledger, &self.roster, &self.headstarts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::increment::{RandomIncrements, ScriptedIncrements};
    use crate::core::scoring::MAX_POINTS_PER_RACE;

    fn default_championship(seed: u64) -> Championship<RandomIncrements<rand::rngs::StdRng>> {
        let roster = Roster::default();
        let headstarts = Headstarts::new(roster.no_competitors());
        Championship::new(roster, headstarts, RandomIncrements::seeded(seed)).unwrap()
    }

    #[test]
    fn completed_race_is_booked_exactly_once() {
        let mut championship = default_championship(1);

        championship.start_race().unwrap();
        while championship.race().is_active() {
            championship.tick().unwrap();
            if championship.race().is_active() {
                assert_eq!(championship.ledger().races_completed(), 0);
            }
        }

        assert_eq!(championship.ledger().races_completed(), 1);
        assert_eq!(championship.tick().err(), Some(RaceError::NoRaceRunning));
        assert_eq!(championship.ledger().races_completed(), 1);

        let points: u32 = championship
            .ledger()
            .driver_tallies()
            .iter()
            .map(|t| t.points)
            .sum();
        assert_eq!(points, MAX_POINTS_PER_RACE);
    }

    #[test]
    fn season_invariants_over_several_races() {
        let mut championship = default_championship(99);

        for race_no in 1..=5u32 {
            let result = championship.run_race().unwrap();
            assert_eq!(result.race_no, race_no);
            assert_eq!(result.classification.len(), 20);
        }

        let ledger = championship.ledger();
        let wins: u32 = ledger.driver_tallies().iter().map(|t| t.wins).sum();
        let podiums: u32 = ledger.driver_tallies().iter().map(|t| t.podiums).sum();
        let team_points: u32 = ledger.team_tallies().iter().map(|t| t.points).sum();
        assert_eq!(wins, 5);
        assert_eq!(podiums, 15);
        assert_eq!(team_points, 5 * MAX_POINTS_PER_RACE);
        assert_eq!(ledger.race_summaries().len(), 5);

        for (id, _) in championship.roster().competitors() {
            let rating = championship.rating(id);
            assert!((0.0..=10.0).contains(&rating));
        }
    }

    #[test]
    fn race_result_matches_ledger_podium() {
        let mut championship = default_championship(5);
        assert!(championship.race_result().is_none());

        let result = championship.run_race().unwrap();
        let summary = &championship.ledger().race_summaries()[0];
        let winner = championship.roster().competitor(summary.podium[0].competitor);

        assert_eq!(result.classification[0].driver, winner.name);
        assert_eq!(result.classification[0].points, 25);
        assert_eq!(result.classification[10].points, 0);
        assert!(result.no_ticks > 0);
    }

    #[test]
    fn headstarts_are_locked_during_a_race() {
        let mut championship = default_championship(3);
        championship.set_headstart("Nor", 9).unwrap();
        assert_eq!(championship.get_headstart("Nor"), Some(9));

        championship.start_race().unwrap();
        assert_eq!(championship.set_headstart("Nor", 2), Err(RaceError::RaceInProgress));
        assert_eq!(championship.get_headstart("Nor"), Some(9));

        assert!(championship.abandon_race());
        championship.set_headstart("Nor", 2).unwrap();
        assert_eq!(
            championship.set_headstart("Xyz", 2),
            Err(RaceError::UnknownCompetitor("Xyz".to_owned()))
        );
        assert!(matches!(
            championship.set_headstart("Nor", 12),
            Err(RaceError::HeadstartOutOfRange { .. })
        ));
        assert_eq!(championship.get_headstart("Nor"), Some(2));
    }

    #[test]
    fn abandoned_race_books_nothing() {
        let mut championship = default_championship(8);
        championship.start_race().unwrap();
        for _ in 0..20 {
            championship.tick().unwrap();
        }

        assert!(championship.abandon_race());
        assert_eq!(championship.ledger().races_completed(), 0);
        assert!(championship.start_race().is_ok());
    }

    #[test]
    fn start_race_shows_initial_grid() {
        let roster = Roster::default();
        let headstarts = Headstarts::new(roster.no_competitors());
        let mut championship =
            Championship::new(roster, headstarts, ScriptedIncrements::constant(2)).unwrap();

        let leaderboard: Vec<_> = championship.start_race().unwrap().collect();
        assert_eq!(leaderboard.len(), 20);
        assert!(leaderboard.iter().all(|e| e.progress == 1 && !e.finished));
        assert_eq!(championship.start_race().err(), Some(RaceError::RaceInProgress));
    }

    #[test]
    fn mismatching_headstarts_are_rejected() {
        let result = Championship::new(
            Roster::default(),
            Headstarts::new(4),
            ScriptedIncrements::constant(1),
        );
        assert!(matches!(result, Err(RaceError::InvalidRoster(_))));
    }
}
