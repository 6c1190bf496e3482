use crate::core::headstart::Headstarts;
use crate::core::increment::IncrementSource;
use crate::core::roster::{CompetitorId, Roster, TeamId};
use crate::core::state_handler::{RacePhase, StateHandler};
use crate::error::RaceError;
use helpers::general::{argsort, SortOrder};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Progress value at which a driver has finished the race.
pub const FINISH_LINE: u8 = 100;

/// TickOutcome tells the caller whether the last tick completed the race. Finished is returned
/// exactly once per race, by the tick in which the last driver crossed the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Finished,
}

/// * `position` - 1-based position on the leaderboard
/// * `competitor` - Driver
/// * `team` - Team of the driver
/// * `progress` - (%) Race progress, always FINISH_LINE for finished drivers
/// * `finished` - True if the driver crossed the finish line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub position: usize,
    pub competitor: CompetitorId,
    pub team: TeamId,
    pub progress: u8,
    pub finished: bool,
}

/// Leaderboard iterates over the current ranking: finished drivers in finishing order first,
/// followed by the drivers still racing sorted by descending progress (ties in roster order).
/// Clone the leaderboard to iterate over the same ranking again.
#[derive(Debug, Clone)]
pub struct Leaderboard<'a> {
    progress: &'a [u8],
    teams: &'a [TeamId],
    finished: std::slice::Iter<'a, CompetitorId>,
    racing: std::vec::IntoIter<usize>,
    position: usize,
}

impl<'a> Iterator for Leaderboard<'a> {
    type Item = LeaderboardEntry;

    fn next(&mut self) -> Option<LeaderboardEntry> {
        let (competitor, finished) = if let Some(&id) = self.finished.next() {
            (id, true)
        } else {
            (CompetitorId(self.racing.next()?), false)
        };
        self.position += 1;

        Some(LeaderboardEntry {
            position: self.position,
            competitor,
            team: self.teams[competitor.0],
            progress: if finished {
                FINISH_LINE
            } else {
                self.progress[competitor.0]
            },
            finished,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.finished.len() + self.racing.len();
        (len, Some(len))
    }
}

impl<'a> ExactSizeIterator for Leaderboard<'a> {}

/// Race owns the live state of a single race: the progress of every driver and the order in which
/// they crossed the finish line. It is reset at the start of every race.
#[derive(Debug)]
pub struct Race {
    teams: Vec<TeamId>,
    progress: Vec<u8>,
    race_finished: Vec<bool>,
    finish_order: Vec<CompetitorId>,
    cur_tick: u32,
    sh: StateHandler,
}

impl Race {
    pub fn new(roster: &Roster) -> Race {
        let no_competitors = roster.no_competitors();

        Race {
            teams: roster.competitors().map(|(_, c)| c.team).collect(),
            progress: vec![0; no_competitors],
            race_finished: vec![false; no_competitors],
            finish_order: Vec::with_capacity(no_competitors),
            cur_tick: 0,
            sh: StateHandler::default(),
        }
    }

    // ---------------------------------------------------------------------------------------------
    // MAIN METHODS --------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// start_race places every driver at its headstart and clears the finishing order. Rejected
    /// while another race is active.
    pub fn start_race(&mut self, headstarts: &Headstarts) -> Result<(), RaceError> {
        if headstarts.len() != self.progress.len() {
            return Err(RaceError::InvalidRoster(format!(
                "{} headstarts given for {} drivers",
                headstarts.len(),
                self.progress.len()
            )));
        }

        if let Err(e) = self.sh.act_race() {
            warn!("Rejected race start: {}", e);
            return Err(e);
        }

        for (id, headstart) in headstarts.iter() {
            self.progress[id.0] = headstart.min(FINISH_LINE);
        }
        self.race_finished.iter_mut().for_each(|x| *x = false);
        self.finish_order.clear();
        self.cur_tick = 0;

        info!("Race started with {} drivers", self.progress.len());
        Ok(())
    }

    /// tick advances every unfinished driver by one increment drawn from the given source (one
    /// draw per unfinished driver, in roster order). Drivers reaching the finish line within the
    /// same tick are classified in roster order. Rejected if no race is active.
    pub fn tick<I: IncrementSource + ?Sized>(
        &mut self,
        increments: &mut I,
    ) -> Result<TickOutcome, RaceError> {
        if let Err(e) = self.sh.check_tick_allowed() {
            warn!("Rejected tick: {}", e);
            return Err(e);
        }

        self.cur_tick += 1;

        for i in 0..self.progress.len() {
            if self.progress[i] >= FINISH_LINE {
                continue;
            }

            let increment = increments.draw();
            self.progress[i] = self.progress[i].saturating_add(increment).min(FINISH_LINE);

            if self.progress[i] == FINISH_LINE && !self.race_finished[i] {
                self.race_finished[i] = true;
                self.finish_order.push(CompetitorId(i));
                debug!(
                    "Driver {} finished in P{} after {} ticks",
                    i,
                    self.finish_order.len(),
                    self.cur_tick
                );
            }
        }

        if self.finish_order.len() == self.progress.len() {
            self.sh.finish_race();
            info!("Race finished after {} ticks", self.cur_tick);
            Ok(TickOutcome::Finished)
        } else {
            debug!(
                "Tick {}: {} of {} drivers finished",
                self.cur_tick,
                self.finish_order.len(),
                self.progress.len()
            );
            Ok(TickOutcome::Running)
        }
    }

    /// current_leaderboard returns the ranking at the current state of the race.
    pub fn current_leaderboard(&self) -> Leaderboard<'_> {
        let racing_idxs: Vec<usize> = (0..self.progress.len())
            .filter(|&i| !self.race_finished[i])
            .collect();
        let racing_progress: Vec<u8> = racing_idxs.iter().map(|&i| self.progress[i]).collect();

        let racing: Vec<usize> = argsort(&racing_progress, SortOrder::Descending)
            .into_iter()
            .map(|j| racing_idxs[j])
            .collect();

        Leaderboard {
            progress: &self.progress,
            teams: &self.teams,
            finished: self.finish_order.iter(),
            racing: racing.into_iter(),
            position: 0,
        }
    }

    /// abandon_race discards a partially run race. Returns false if no race was active.
    pub fn abandon_race(&mut self) -> bool {
        let abandoned = self.sh.abandon_race();
        if abandoned {
            info!(
                "Race abandoned after {} ticks with {} drivers finished",
                self.cur_tick,
                self.finish_order.len()
            );
        }
        abandoned
    }

    // ---------------------------------------------------------------------------------------------
    // METHODS (HELPERS) ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn get_phase(&self) -> RacePhase {
        self.sh.get_phase()
    }

    pub fn is_active(&self) -> bool {
        self.sh.is_active()
    }

    pub fn is_finished(&self) -> bool {
        self.sh.is_finished()
    }

    pub fn get_progress(&self, id: CompetitorId) -> u8 {
        self.progress[id.0]
    }

    pub fn get_progress_all(&self) -> &[u8] {
        &self.progress
    }

    pub fn get_finish_order(&self) -> &[CompetitorId] {
        &self.finish_order
    }

    pub fn get_cur_tick(&self) -> u32 {
        self.cur_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::increment::{RandomIncrements, ScriptedIncrements};
    use crate::core::roster::TeamPars;

    fn small_roster() -> Roster {
        Roster::new(&[
            TeamPars {
                name: "T1".to_owned(),
                drivers: ["A".to_owned(), "B".to_owned()],
            },
            TeamPars {
                name: "T2".to_owned(),
                drivers: ["C".to_owned(), "D".to_owned()],
            },
        ])
        .unwrap()
    }

    fn run_to_end<I: IncrementSource>(race: &mut Race, increments: &mut I) -> u32 {
        let mut ticks = 0;
        while race.tick(increments).unwrap() == TickOutcome::Running {
            ticks += 1;
            assert!(ticks < 10_000, "race does not terminate");
        }
        ticks + 1
    }

    #[test]
    fn start_race_places_drivers_at_headstart() {
        let roster = Roster::default();
        let mut race = Race::new(&roster);
        let headstarts = Headstarts::new(roster.no_competitors());

        race.start_race(&headstarts).unwrap();

        assert!(race.is_active());
        assert!(race.get_progress_all().iter().all(|&p| p == 1));
        let leaderboard: Vec<LeaderboardEntry> = race.current_leaderboard().collect();
        assert_eq!(leaderboard.len(), 20);
        for (i, entry) in leaderboard.iter().enumerate() {
            assert_eq!(entry.position, i + 1);
            assert_eq!(entry.competitor, CompetitorId(i));
            assert_eq!(entry.progress, 1);
            assert!(!entry.finished);
        }
    }

    #[test]
    fn ticks_are_rejected_outside_of_a_race() {
        let roster = small_roster();
        let mut race = Race::new(&roster);
        let mut increments = ScriptedIncrements::constant(4);

        assert_eq!(race.tick(&mut increments), Err(RaceError::NoRaceRunning));
        assert_eq!(race.get_phase(), RacePhase::Idle);

        race.start_race(&Headstarts::new(4)).unwrap();
        run_to_end(&mut race, &mut increments);

        assert!(race.is_finished());
        assert_eq!(race.tick(&mut increments), Err(RaceError::NoRaceRunning));
        assert_eq!(race.get_finish_order().len(), 4);
    }

    #[test]
    fn second_start_is_rejected_without_reset() {
        let roster = small_roster();
        let mut race = Race::new(&roster);
        let mut increments = ScriptedIncrements::constant(3);

        race.start_race(&Headstarts::new(4)).unwrap();
        race.tick(&mut increments).unwrap();
        let progress_before = race.get_progress_all().to_vec();

        assert_eq!(race.start_race(&Headstarts::new(4)), Err(RaceError::RaceInProgress));
        assert_eq!(race.get_progress_all(), progress_before.as_slice());
        assert_eq!(race.get_cur_tick(), 1);
    }

    #[test]
    fn simultaneous_finishers_are_classified_in_roster_order() {
        let roster = small_roster();
        let mut race = Race::new(&roster);
        let mut headstarts = Headstarts::new(4);
        headstarts.set(&roster, CompetitorId(3), 9).unwrap();
        headstarts.set(&roster, CompetitorId(1), 9).unwrap();
        let mut increments = ScriptedIncrements::constant(4);

        race.start_race(&headstarts).unwrap();
        run_to_end(&mut race, &mut increments);

        // B and D (9) need 23 ticks, A and C (1) need 25 ticks
        assert_eq!(
            race.get_finish_order(),
            &[CompetitorId(1), CompetitorId(3), CompetitorId(0), CompetitorId(2)]
        );
    }

    #[test]
    fn leaderboard_puts_finishers_first_then_sorts_by_progress() {
        let roster = small_roster();
        let mut race = Race::new(&roster);
        let mut headstarts = Headstarts::new(4);
        headstarts.set(&roster, CompetitorId(2), 9).unwrap();
        race.start_race(&headstarts).unwrap();

        // A +0, B +4, C +4, D +1 per tick
        let mut increments = ScriptedIncrements::new(vec![0, 4, 4, 1]);
        for _ in 0..23 {
            race.tick(&mut increments).unwrap();
        }
        // C: 9 + 92 -> finished, B: 1 + 92 = 93, D: 1 + 23 = 24, A: 1
        let leaderboard: Vec<LeaderboardEntry> = race.current_leaderboard().collect();
        let order: Vec<CompetitorId> = leaderboard.iter().map(|e| e.competitor).collect();
        assert_eq!(
            order,
            vec![CompetitorId(2), CompetitorId(1), CompetitorId(3), CompetitorId(0)]
        );
        assert!(leaderboard[0].finished);
        assert_eq!(leaderboard[0].progress, FINISH_LINE);
        assert_eq!(leaderboard[1].progress, 93);
        assert_eq!(leaderboard[3].progress, 1);
        assert_eq!(leaderboard[1].team, TeamId(0));
    }

    #[test]
    fn leaderboard_can_be_iterated_repeatedly() {
        let roster = Roster::default();
        let mut race = Race::new(&roster);
        race.start_race(&Headstarts::new(20)).unwrap();
        race.tick(&mut RandomIncrements::seeded(3)).unwrap();

        let leaderboard = race.current_leaderboard();
        assert_eq!(leaderboard.len(), 20);
        let first: Vec<LeaderboardEntry> = leaderboard.clone().collect();
        let second: Vec<LeaderboardEntry> = leaderboard.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn abandoned_race_can_be_restarted() {
        let roster = small_roster();
        let mut race = Race::new(&roster);
        let mut increments = ScriptedIncrements::constant(4);

        race.start_race(&Headstarts::new(4)).unwrap();
        for _ in 0..10 {
            race.tick(&mut increments).unwrap();
        }
        assert!(race.abandon_race());
        assert!(!race.abandon_race());

        race.start_race(&Headstarts::new(4)).unwrap();
        assert!(race.get_finish_order().is_empty());
        assert!(race.get_progress_all().iter().all(|&p| p == 1));
    }

    #[test]
    fn fixed_increments_reproduce_the_finish_order() {
        let roster = Roster::default();
        let mut headstarts = Headstarts::new(20);
        for i in 0..20 {
            headstarts.set(&roster, CompetitorId(i), (i % 9 + 1) as i64).unwrap();
        }

        let mut orders = Vec::new();
        for _ in 0..2 {
            let mut race = Race::new(&roster);
            let mut increments = RandomIncrements::seeded(2025);
            race.start_race(&headstarts).unwrap();
            run_to_end(&mut race, &mut increments);
            orders.push(race.get_finish_order().to_vec());
        }

        assert_eq!(orders[0], orders[1]);
    }

    #[test]
    fn headstart_table_must_match_the_field() {
        let roster = small_roster();
        let mut race = Race::new(&roster);
        assert!(matches!(
            race.start_race(&Headstarts::new(20)),
            Err(RaceError::InvalidRoster(_))
        ));
        assert_eq!(race.get_phase(), RacePhase::Idle);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn progress_is_monotonic_and_bounded(
                seed in 0u64..10_000,
                headstart_vals in proptest::collection::vec(1i64..=9, 20)
            ) {
                let roster = Roster::default();
                let mut headstarts = Headstarts::new(20);
                for (i, &v) in headstart_vals.iter().enumerate() {
                    headstarts.set(&roster, CompetitorId(i), v).unwrap();
                }

                let mut race = Race::new(&roster);
                let mut increments = RandomIncrements::seeded(seed);
                race.start_race(&headstarts).unwrap();

                let mut prev = race.get_progress_all().to_vec();
                loop {
                    let outcome = race.tick(&mut increments).unwrap();
                    let cur = race.get_progress_all();

                    for i in 0..20 {
                        prop_assert!(cur[i] >= prev[i]);
                        prop_assert!(cur[i] <= FINISH_LINE);
                        let in_order = race.get_finish_order().contains(&CompetitorId(i));
                        prop_assert_eq!(in_order, cur[i] == FINISH_LINE);
                    }
                    prop_assert!(race.get_finish_order().len() <= 20);

                    let mut sorted = race.get_finish_order().to_vec();
                    sorted.sort();
                    sorted.dedup();
                    prop_assert_eq!(sorted.len(), race.get_finish_order().len());

                    prev = cur.to_vec();
                    if outcome == TickOutcome::Finished {
                        break;
                    }
                }

                prop_assert!(race.is_finished());
                prop_assert_eq!(race.get_finish_order().len(), 20);
            }
        }
    }
}
