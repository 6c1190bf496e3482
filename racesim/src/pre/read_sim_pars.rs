use crate::core::headstart::Headstarts;
use crate::core::roster::{default_team_pars, Roster, TeamPars};
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::Path;

/// SeasonPars contains the grid and the headstart settings of a season. Both are optional: a
/// missing grid falls back to the 2025 grid, drivers without headstart start at the default.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct SeasonPars {
    #[serde(default)]
    pub teams: Option<Vec<TeamPars>>,
    #[serde(default)]
    pub headstarts: HashMap<String, i64>,
}

impl SeasonPars {
    /// build_roster validates the grid and creates the roster from it.
    pub fn build_roster(&self) -> anyhow::Result<Roster> {
        let roster = match &self.teams {
            Some(teams) => Roster::new(teams),
            None => Roster::new(&default_team_pars()),
        };
        roster.context("Invalid team list in season parameters!")
    }

    /// build_headstarts validates the headstart settings against the roster.
    pub fn build_headstarts(&self, roster: &Roster) -> anyhow::Result<Headstarts> {
        Headstarts::from_map(roster, &self.headstarts)
            .context("Invalid headstarts in season parameters!")
    }
}

/// read_sim_pars reads the JSON file and decodes the JSON string into the season parameters
/// struct.
pub fn read_sim_pars(filepath: &Path) -> anyhow::Result<SeasonPars> {
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open parameter file {}!",
            filepath.display()
        ))?;
    let pars = serde_json::from_reader(&fh).context(format!(
        "Failed to parse parameter file {}!",
        filepath.display()
    ))?;
    Ok(pars)
}
