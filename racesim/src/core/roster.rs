use crate::error::RaceError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Index of a driver in the fixed roster order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CompetitorId(pub usize);

/// Index of a team in the fixed roster order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TeamId(pub usize);

/// * `name` - Team (constructor) name, e.g. McLaren
/// * `drivers` - Short names of both drivers, e.g. ["Nor", "Pia"]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TeamPars {
    pub name: String,
    pub drivers: [String; 2],
}

#[derive(Debug, Clone)]
pub struct Competitor {
    pub name: String,
    pub team: TeamId,
}

#[derive(Debug, Clone)]
pub struct Team {
    pub name: String,
    pub drivers: [CompetitorId; 2],
}

/// Roster holds the static field of the season. The order of the competitors is the order in which
/// the teams and their drivers were inserted and is used as tie-break everywhere.
#[derive(Debug, Clone)]
pub struct Roster {
    competitors: Vec<Competitor>,
    teams: Vec<Team>,
}

/// The 2025 field as used by default.
pub const DEFAULT_TEAMS: [(&str, [&str; 2]); 10] = [
    ("Alpine", ["Gas", "Col"]),
    ("Aston Martin", ["Alo", "Str"]),
    ("Ferrari", ["Lec", "Ham"]),
    ("Haas", ["Oco", "Bea"]),
    ("McLaren", ["Nor", "Pia"]),
    ("Mercedes", ["Rus", "Ant"]),
    ("Racing Bulls", ["Had", "Law"]),
    ("Red Bull", ["Ver", "Tsu"]),
    ("Sauber", ["Hul", "Bor"]),
    ("Williams", ["Sai", "Alb"]),
];

pub fn default_team_pars() -> Vec<TeamPars> {
    DEFAULT_TEAMS
        .iter()
        .map(|(name, drivers)| TeamPars {
            name: (*name).to_owned(),
            drivers: [drivers[0].to_owned(), drivers[1].to_owned()],
        })
        .collect()
}

impl Roster {
    pub fn new(team_pars_all: &[TeamPars]) -> Result<Roster, RaceError> {
        if team_pars_all.is_empty() {
            return Err(RaceError::InvalidRoster("no teams given".to_owned()));
        }

        let mut team_names = HashSet::with_capacity(team_pars_all.len());
        let mut driver_names = HashSet::with_capacity(2 * team_pars_all.len());
        let mut competitors = Vec::with_capacity(2 * team_pars_all.len());
        let mut teams = Vec::with_capacity(team_pars_all.len());

        for (team_idx, team_pars) in team_pars_all.iter().enumerate() {
            if !team_names.insert(team_pars.name.as_str()) {
                return Err(RaceError::InvalidRoster(format!(
                    "team {} appears twice",
                    team_pars.name
                )));
            }

            let mut drivers = [CompetitorId(0); 2];
            for (slot, driver_name) in team_pars.drivers.iter().enumerate() {
                if !driver_names.insert(driver_name.as_str()) {
                    return Err(RaceError::InvalidRoster(format!(
                        "driver {} appears twice",
                        driver_name
                    )));
                }
                drivers[slot] = CompetitorId(competitors.len());
                competitors.push(Competitor {
                    name: driver_name.to_owned(),
                    team: TeamId(team_idx),
                });
            }

            teams.push(Team {
                name: team_pars.name.to_owned(),
                drivers,
            });
        }

        Ok(Roster { competitors, teams })
    }

    pub fn no_competitors(&self) -> usize {
        self.competitors.len()
    }

    pub fn no_teams(&self) -> usize {
        self.teams.len()
    }

    pub fn competitor(&self, id: CompetitorId) -> &Competitor {
        &self.competitors[id.0]
    }

    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.0]
    }

    pub fn team_of(&self, id: CompetitorId) -> &Team {
        self.team(self.competitors[id.0].team)
    }

    pub fn competitors(&self) -> impl Iterator<Item = (CompetitorId, &Competitor)> + '_ {
        self.competitors
            .iter()
            .enumerate()
            .map(|(i, c)| (CompetitorId(i), c))
    }

    pub fn teams(&self) -> impl Iterator<Item = (TeamId, &Team)> + '_ {
        self.teams.iter().enumerate().map(|(i, t)| (TeamId(i), t))
    }

    pub fn find_competitor(&self, name: &str) -> Option<CompetitorId> {
        self.competitors
            .iter()
            .position(|c| c.name == name)
            .map(CompetitorId)
    }
}

impl Default for Roster {
    fn default() -> Self {
        let competitors = DEFAULT_TEAMS
            .iter()
            .enumerate()
            .flat_map(|(team_idx, (_, drivers))| {
                drivers.iter().map(move |name| Competitor {
                    name: (*name).to_owned(),
                    team: TeamId(team_idx),
                })
            })
            .collect();
        let teams = DEFAULT_TEAMS
            .iter()
            .enumerate()
            .map(|(team_idx, (name, _))| Team {
                name: (*name).to_owned(),
                drivers: [CompetitorId(2 * team_idx), CompetitorId(2 * team_idx + 1)],
            })
            .collect();

        Roster { competitors, teams }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_has_twenty_drivers_in_team_order() {
        let roster = Roster::default();
        assert_eq!(roster.no_competitors(), 20);
        assert_eq!(roster.no_teams(), 10);
        assert_eq!(roster.competitor(CompetitorId(0)).name, "Gas");
        assert_eq!(roster.competitor(CompetitorId(19)).name, "Alb");
        assert_eq!(roster.team_of(CompetitorId(9)).name, "McLaren");
        assert_eq!(roster.team(TeamId(4)).drivers, [CompetitorId(8), CompetitorId(9)]);
    }

    #[test]
    fn roster_from_pars_matches_default() {
        let from_pars = Roster::new(&default_team_pars()).unwrap();
        let default = Roster::default();
        for ((a, ca), (b, cb)) in from_pars.competitors().zip(default.competitors()) {
            assert_eq!(a, b);
            assert_eq!(ca.name, cb.name);
            assert_eq!(ca.team, cb.team);
        }
    }

    #[test]
    fn duplicate_driver_is_rejected() {
        let pars = vec![
            TeamPars {
                name: "A".to_owned(),
                drivers: ["X".to_owned(), "Y".to_owned()],
            },
            TeamPars {
                name: "B".to_owned(),
                drivers: ["Y".to_owned(), "Z".to_owned()],
            },
        ];
        assert!(matches!(Roster::new(&pars), Err(RaceError::InvalidRoster(_))));
    }

    #[test]
    fn empty_roster_is_rejected() {
        assert!(Roster::new(&[]).is_err());
    }

    #[test]
    fn find_competitor_by_name() {
        let roster = Roster::default();
        assert_eq!(roster.find_competitor("Ver"), Some(CompetitorId(14)));
        assert_eq!(roster.find_competitor("Msc"), None);
    }
}
