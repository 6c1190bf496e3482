//! Season superlatives. All awards are recomputed from the ledger on every call. Ties go to the
//! driver or team that comes first in roster order. An award without any qualifying driver or
//! team (e.g. before the first race) is None.

use crate::core::headstart::Headstarts;
use crate::core::roster::{CompetitorId, Roster, TeamId};
use crate::core::season::SeasonLedger;
use helpers::general::{argmax, argmin, argsort, SortOrder};
use serde::Serialize;

/// most_wins returns the driver with the most wins.
pub fn most_wins(ledger: &SeasonLedger) -> Option<CompetitorId> {
    let wins: Vec<u32> = ledger.driver_tallies().iter().map(|t| t.wins).collect();
    argmax(&wins)
        .filter(|&idx| wins[idx] > 0)
        .map(CompetitorId)
}

/// most_podiums returns the driver with the most podium finishes.
pub fn most_podiums(ledger: &SeasonLedger) -> Option<CompetitorId> {
    let podiums: Vec<u32> = ledger.driver_tallies().iter().map(|t| t.podiums).collect();
    argmax(&podiums)
        .filter(|&idx| podiums[idx] > 0)
        .map(CompetitorId)
}

/// best_constructor returns the team with the most points.
pub fn best_constructor(ledger: &SeasonLedger) -> Option<TeamId> {
    let points: Vec<u32> = ledger.team_tallies().iter().map(|t| t.points).collect();
    argmax(&points).filter(|&idx| points[idx] > 0).map(TeamId)
}

/// most_balanced_team returns the team with the smallest points gap between its two drivers. Only
/// teams with at least one scoring driver qualify.
pub fn most_balanced_team(ledger: &SeasonLedger, roster: &Roster) -> Option<TeamId> {
    let mut candidates = Vec::new();
    let mut gaps = Vec::new();

    for (team_id, team) in roster.teams() {
        let p1 = ledger.driver_tally(team.drivers[0]).points;
        let p2 = ledger.driver_tally(team.drivers[1]).points;
        if p1 > 0 || p2 > 0 {
            candidates.push(team_id);
            gaps.push((p1 as i64 - p2 as i64).abs());
        }
    }

    argmin(&gaps).map(|i| candidates[i])
}

/// most_consistent returns the highest placed driver in the championship that scored points
/// without winning a race.
pub fn most_consistent(ledger: &SeasonLedger) -> Option<CompetitorId> {
    let tallies = ledger.driver_tallies();
    let points: Vec<u32> = tallies.iter().map(|t| t.points).collect();

    argsort(&points, SortOrder::Descending)
        .into_iter()
        .find(|&idx| tallies[idx].wins == 0 && tallies[idx].points > 0)
        .map(CompetitorId)
}

/// points_per_headstart returns the points of every scoring driver divided by its headstart.
fn points_per_headstart(
    ledger: &SeasonLedger,
    headstarts: &Headstarts,
) -> (Vec<CompetitorId>, Vec<f64>) {
    ledger
        .driver_tallies()
        .iter()
        .enumerate()
        .filter(|(_, t)| t.points > 0)
        .map(|(idx, t)| {
            let id = CompetitorId(idx);
            (id, t.points as f64 / headstarts.get(id) as f64)
        })
        .unzip()
}

/// best_underdog returns the driver with the best points per headstart ratio, i.e. the driver that
/// made the most of a small headstart.
pub fn best_underdog(ledger: &SeasonLedger, headstarts: &Headstarts) -> Option<CompetitorId> {
    let (candidates, ratios) = points_per_headstart(ledger, headstarts);
    argmax(&ratios).map(|i| candidates[i])
}

/// speed_demon uses the same points per headstart ratio as best_underdog.
// TODO: replace with a separate pace metric once one is tracked per driver
pub fn speed_demon(ledger: &SeasonLedger, headstarts: &Headstarts) -> Option<CompetitorId> {
    best_underdog(ledger, headstarts)
}

// -------------------------------------------------------------------------------------------------
// AWARD TABLE -------------------------------------------------------------------------------------
// -------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverAward {
    pub driver: String,
    pub team: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAward {
    pub team: String,
    pub value: f64,
}

/// SeasonAwards bundles all awards, resolved to names and the value that earned them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonAwards {
    pub most_wins: Option<DriverAward>,
    pub most_podiums: Option<DriverAward>,
    pub best_constructor: Option<TeamAward>,
    pub most_balanced_team: Option<TeamAward>,
    pub most_consistent: Option<DriverAward>,
    pub best_underdog: Option<DriverAward>,
    pub speed_demon: Option<DriverAward>,
}

impl SeasonAwards {
    pub fn compute(ledger: &SeasonLedger, roster: &Roster, headstarts: &Headstarts) -> SeasonAwards {
        let driver_award = |id: CompetitorId, value: f64| DriverAward {
            driver: roster.competitor(id).name.to_owned(),
            team: roster.team_of(id).name.to_owned(),
            value,
        };
        let ratio = |id: CompetitorId| {
            ledger.driver_tally(id).points as f64 / headstarts.get(id) as f64
        };

        SeasonAwards {
            most_wins: most_wins(ledger)
                .map(|id| driver_award(id, ledger.driver_tally(id).wins as f64)),
            most_podiums: most_podiums(ledger)
                .map(|id| driver_award(id, ledger.driver_tally(id).podiums as f64)),
            best_constructor: best_constructor(ledger).map(|id| TeamAward {
                team: roster.team(id).name.to_owned(),
                value: ledger.team_tally(id).points as f64,
            }),
            most_balanced_team: most_balanced_team(ledger, roster).map(|id| {
                let [d1, d2] = roster.team(id).drivers;
                let gap = ledger.driver_tally(d1).points as f64 - ledger.driver_tally(d2).points as f64;
                TeamAward {
                    team: roster.team(id).name.to_owned(),
                    value: gap.abs(),
                }
            }),
            most_consistent: most_consistent(ledger)
                .map(|id| driver_award(id, ledger.driver_tally(id).points as f64)),
            best_underdog: best_underdog(ledger, headstarts).map(|id| driver_award(id, ratio(id))),
            speed_demon: speed_demon(ledger, headstarts).map(|id| driver_award(id, ratio(id))),
        }
    }
}
