use crate::core::rating;
use crate::core::roster::{CompetitorId, Roster, TeamId};
use crate::core::scoring::{is_podium, is_win, points_for_position, PODIUM_POSITIONS};
use serde::Serialize;
use tracing::{debug, info};

/// Tally holds the accumulated statistics of a driver or a team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub points: u32,
    pub wins: u32,
    pub podiums: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PodiumEntry {
    pub competitor: CompetitorId,
    pub team: TeamId,
}

/// RaceSummary stores the podium of a completed race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceSummary {
    pub race_no: u32,
    pub podium: [PodiumEntry; PODIUM_POSITIONS],
}

/// SeasonLedger accumulates the championship statistics over all completed races. Totals only
/// ever grow.
///
/// finalize_race must be called exactly once per completed race. The ledger cannot detect a
/// repeated call for the same race, which would count the race twice.
#[derive(Debug, Clone)]
pub struct SeasonLedger {
    team_of: Vec<TeamId>,
    drivers: Vec<Tally>,
    teams: Vec<Tally>,
    races_completed: u32,
    race_summaries: Vec<RaceSummary>,
}

impl SeasonLedger {
    pub fn new(roster: &Roster) -> SeasonLedger {
        SeasonLedger {
            team_of: roster.competitors().map(|(_, c)| c.team).collect(),
            drivers: vec![Tally::default(); roster.no_competitors()],
            teams: vec![Tally::default(); roster.no_teams()],
            races_completed: 0,
            race_summaries: Vec::new(),
        }
    }

    /// finalize_race books the result of a completed race. Every driver in finish_order receives
    /// the points of its position, the winner a win and the first three a podium, for themselves
    /// and for their teams. A podium summary is recorded only if at least three drivers finished.
    pub fn finalize_race(&mut self, finish_order: &[CompetitorId]) {
        debug_assert!(finish_order.len() <= self.drivers.len());

        for (idx, &competitor) in finish_order.iter().enumerate() {
            let pos = idx as i64 + 1;
            let team = self.team_of[competitor.0];
            let points = points_for_position(pos);

            for tally in [&mut self.drivers[competitor.0], &mut self.teams[team.0]] {
                tally.points += points;
                if is_win(pos) {
                    tally.wins += 1;
                }
                if is_podium(pos) {
                    tally.podiums += 1;
                }
            }
        }

        self.races_completed += 1;

        if finish_order.len() >= PODIUM_POSITIONS {
            let entry = |idx: usize| PodiumEntry {
                competitor: finish_order[idx],
                team: self.team_of[finish_order[idx].0],
            };
            let summary = RaceSummary {
                race_no: self.races_completed,
                podium: [entry(0), entry(1), entry(2)],
            };
            self.race_summaries.push(summary);
        } else {
            debug!(
                "Only {} drivers finished race {}, no podium summary recorded",
                finish_order.len(),
                self.races_completed
            );
        }

        info!(
            "Booked race {} with {} classified drivers",
            self.races_completed,
            finish_order.len()
        );
    }

    // ---------------------------------------------------------------------------------------------
    // ACCESSORS -----------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn races_completed(&self) -> u32 {
        self.races_completed
    }

    pub fn driver_tally(&self, id: CompetitorId) -> Tally {
        self.drivers[id.0]
    }

    pub fn team_tally(&self, id: TeamId) -> Tally {
        self.teams[id.0]
    }

    pub fn driver_tallies(&self) -> &[Tally] {
        &self.drivers
    }

    pub fn team_tallies(&self) -> &[Tally] {
        &self.teams
    }

    pub fn race_summaries(&self) -> &[RaceSummary] {
        &self.race_summaries
    }

    /// rating returns the 0-10 quality score of a driver.
    pub fn rating(&self, id: CompetitorId) -> f64 {
        rating::calc_rating(&self.drivers[id.0], self.races_completed)
    }
}
