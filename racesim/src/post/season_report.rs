use crate::core::awards::{DriverAward, SeasonAwards, TeamAward};
use crate::core::headstart::Headstarts;
use crate::core::roster::Roster;
use crate::core::season::SeasonLedger;
use crate::core::standings::{
    constructor_standings, constructor_statistics, driver_standings, driver_statistics,
    team_contributions, DriverStanding, TeamContribution, TeamStanding,
};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub race_no: u32,
    pub p1: String,
    pub p2: String,
    pub p3: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadstartRow {
    pub driver: String,
    pub team: String,
    pub headstart: u8,
}

/// SeasonReport is a snapshot of the whole championship, resolved to names, as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonReport {
    pub races_completed: u32,
    pub race_summaries: Vec<SummaryRow>,
    pub driver_standings: Vec<DriverStanding>,
    pub constructor_standings: Vec<TeamStanding>,
    pub driver_statistics: Vec<DriverStanding>,
    pub constructor_statistics: Vec<TeamStanding>,
    pub team_contributions: Vec<TeamContribution>,
    pub headstarts: Vec<HeadstartRow>,
    pub awards: SeasonAwards,
}

impl SeasonReport {
    pub fn new(ledger: &SeasonLedger, roster: &Roster, headstarts: &Headstarts) -> SeasonReport {
        let label = |entry: &crate::core::season::PodiumEntry| {
            format!(
                "{} ({})",
                roster.competitor(entry.competitor).name,
                roster.team(entry.team).name
            )
        };

        SeasonReport {
            races_completed: ledger.races_completed(),
            race_summaries: ledger
                .race_summaries()
                .iter()
                .map(|s| SummaryRow {
                    race_no: s.race_no,
                    p1: label(&s.podium[0]),
                    p2: label(&s.podium[1]),
                    p3: label(&s.podium[2]),
                })
                .collect(),
            driver_standings: driver_standings(ledger, roster),
            constructor_standings: constructor_standings(ledger, roster),
            driver_statistics: driver_statistics(ledger, roster),
            constructor_statistics: constructor_statistics(ledger, roster),
            team_contributions: team_contributions(ledger, roster),
            headstarts: headstarts
                .iter()
                .map(|(id, headstart)| HeadstartRow {
                    driver: roster.competitor(id).name.to_owned(),
                    team: roster.team_of(id).name.to_owned(),
                    headstart,
                })
                .collect(),
            awards: SeasonAwards::compute(ledger, roster, headstarts),
        }
    }

    /// format_report returns the report as text tables.
    pub fn format_report(&self) -> Result<String, std::fmt::Error> {
        let mut content = String::new();

        writeln!(&mut content, "RESULT: Races completed: {}", self.races_completed)?;

        writeln!(&mut content, "\nRESULT: Race summary")?;
        if self.race_summaries.is_empty() {
            writeln!(&mut content, "No races completed yet.")?;
        }
        for row in self.race_summaries.iter() {
            writeln!(
                &mut content,
                "{:3}, P1: {}, P2: {}, P3: {}",
                row.race_no, row.p1, row.p2, row.p3
            )?;
        }

        writeln!(&mut content, "\nRESULT: Drivers' championship")?;
        for row in self.driver_standings.iter() {
            writeln!(
                &mut content,
                "P{:<2}, {:>4}, {:<14}, {:>4} pts, rating {:4.1}",
                row.position, row.driver, row.team, row.tally.points, row.rating
            )?;
        }

        writeln!(&mut content, "\nRESULT: Constructors' championship")?;
        for row in self.constructor_standings.iter() {
            writeln!(
                &mut content,
                "P{:<2}, {:<14}, {:>4} pts",
                row.position, row.team, row.tally.points
            )?;
        }

        writeln!(&mut content, "\nRESULT: Team member contributions")?;
        for row in self.team_contributions.iter() {
            writeln!(
                &mut content,
                "{:<14}, {} {:>4}, {} {:>4}, total {:>4}",
                row.team,
                row.drivers[0].0,
                row.drivers[0].1,
                row.drivers[1].0,
                row.drivers[1].1,
                row.total
            )?;
        }

        writeln!(&mut content, "\nRESULT: Constructor statistics")?;
        for row in self.constructor_statistics.iter() {
            writeln!(
                &mut content,
                "P{:<2}, {:<14}, wins {:>3}, podiums {:>3}",
                row.position, row.team, row.tally.wins, row.tally.podiums
            )?;
        }

        writeln!(&mut content, "\nRESULT: Driver statistics")?;
        for row in self.driver_statistics.iter() {
            writeln!(
                &mut content,
                "P{:<2}, {:>4}, {:<14}, wins {:>3}, podiums {:>3}",
                row.position, row.driver, row.team, row.tally.wins, row.tally.podiums
            )?;
        }

        writeln!(&mut content, "\nRESULT: Awards")?;
        let awards = &self.awards;
        write_driver_award(&mut content, "Most wins", &awards.most_wins)?;
        write_driver_award(&mut content, "Most podiums", &awards.most_podiums)?;
        write_team_award(&mut content, "Best constructor", &awards.best_constructor)?;
        write_team_award(&mut content, "Most balanced team", &awards.most_balanced_team)?;
        write_driver_award(&mut content, "Most consistent", &awards.most_consistent)?;
        write_driver_award(&mut content, "Best underdog", &awards.best_underdog)?;
        write_driver_award(&mut content, "Speed demon", &awards.speed_demon)?;

        Ok(content)
    }

    /// print_report prints the report to the console output.
    pub fn print_report(&self) {
        match self.format_report() {
            Ok(content) => print!("{}", content),
            Err(e) => eprintln!("WARNING: Could not format season report: {}", e),
        }
    }
}

fn write_driver_award(
    content: &mut String,
    title: &str,
    award: &Option<DriverAward>,
) -> std::fmt::Result {
    match award {
        Some(a) => writeln!(content, "{:<20}: {} ({}), {:.2}", title, a.driver, a.team, a.value),
        None => writeln!(content, "{:<20}: -", title),
    }
}

fn write_team_award(content: &mut String, title: &str, award: &Option<TeamAward>) -> std::fmt::Result {
    match award {
        Some(a) => writeln!(content, "{:<20}: {}, {:.2}", title, a.team, a.value),
        None => writeln!(content, "{:<20}: -", title),
    }
}
