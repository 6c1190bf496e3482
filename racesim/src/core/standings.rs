use crate::core::roster::{CompetitorId, Roster, TeamId};
use crate::core::season::{SeasonLedger, Tally};
use helpers::general::{argsort, SortOrder};
use serde::Serialize;

/// Row of the drivers' championship or of the driver statistics table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverStanding {
    pub position: usize,
    pub competitor: CompetitorId,
    pub driver: String,
    pub team: String,
    pub tally: Tally,
    pub rating: f64,
}

/// Row of the constructors' championship or of the constructor statistics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStanding {
    pub position: usize,
    pub team_id: TeamId,
    pub team: String,
    pub tally: Tally,
}

/// Points of both drivers of a team and the team total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamContribution {
    pub team: String,
    pub drivers: [(String, u32); 2],
    pub total: u32,
}

fn driver_rows(ledger: &SeasonLedger, roster: &Roster, order: Vec<usize>) -> Vec<DriverStanding> {
    order
        .into_iter()
        .enumerate()
        .map(|(i, idx)| {
            let id = CompetitorId(idx);
            DriverStanding {
                position: i + 1,
                competitor: id,
                driver: roster.competitor(id).name.to_owned(),
                team: roster.team_of(id).name.to_owned(),
                tally: ledger.driver_tally(id),
                rating: ledger.rating(id),
            }
        })
        .collect()
}

fn team_rows(ledger: &SeasonLedger, roster: &Roster, order: Vec<usize>) -> Vec<TeamStanding> {
    order
        .into_iter()
        .enumerate()
        .map(|(i, idx)| {
            let id = TeamId(idx);
            TeamStanding {
                position: i + 1,
                team_id: id,
                team: roster.team(id).name.to_owned(),
                tally: ledger.team_tally(id),
            }
        })
        .collect()
}

/// driver_standings returns the drivers' championship: all drivers by descending points, equal
/// points in roster order.
pub fn driver_standings(ledger: &SeasonLedger, roster: &Roster) -> Vec<DriverStanding> {
    let points: Vec<u32> = ledger.driver_tallies().iter().map(|t| t.points).collect();
    driver_rows(ledger, roster, argsort(&points, SortOrder::Descending))
}

/// constructor_standings returns the constructors' championship: all teams by descending points,
/// equal points in roster order.
pub fn constructor_standings(ledger: &SeasonLedger, roster: &Roster) -> Vec<TeamStanding> {
    let points: Vec<u32> = ledger.team_tallies().iter().map(|t| t.points).collect();
    team_rows(ledger, roster, argsort(&points, SortOrder::Descending))
}

/// driver_statistics returns all drivers sorted by wins and then podiums, both descending.
pub fn driver_statistics(ledger: &SeasonLedger, roster: &Roster) -> Vec<DriverStanding> {
    let keys: Vec<(u32, u32)> = ledger
        .driver_tallies()
        .iter()
        .map(|t| (t.wins, t.podiums))
        .collect();
    driver_rows(ledger, roster, argsort(&keys, SortOrder::Descending))
}

/// constructor_statistics returns all teams sorted by wins and then podiums, both descending.
pub fn constructor_statistics(ledger: &SeasonLedger, roster: &Roster) -> Vec<TeamStanding> {
    let keys: Vec<(u32, u32)> = ledger
        .team_tallies()
        .iter()
        .map(|t| (t.wins, t.podiums))
        .collect();
    team_rows(ledger, roster, argsort(&keys, SortOrder::Descending))
}

/// team_contributions splits the points of every scoring team among its drivers, in the order of
/// the constructors' championship.
pub fn team_contributions(ledger: &SeasonLedger, roster: &Roster) -> Vec<TeamContribution> {
    constructor_standings(ledger, roster)
        .into_iter()
        .filter(|row| row.tally.points > 0)
        .map(|row| {
            let [d1, d2] = roster.team(row.team_id).drivers;
            let entry = |id: CompetitorId| {
                (
                    roster.competitor(id).name.to_owned(),
                    ledger.driver_tally(id).points,
                )
            };
            TeamContribution {
                team: row.team,
                drivers: [entry(d1), entry(d2)],
                total: row.tally.points,
            }
        })
        .collect()
}
