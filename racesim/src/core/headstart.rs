use crate::core::roster::{CompetitorId, Roster};
use crate::error::RaceError;
use std::collections::HashMap;

pub const MIN_HEADSTART: u8 = 1;
pub const MAX_HEADSTART: u8 = 9;
pub const DEFAULT_HEADSTART: u8 = 1;

/// Headstarts stores the starting progress (in percent) of every driver. Values are validated when
/// they are set, out-of-range values are rejected and never clamped. Therefore, every value held
/// here is in [MIN_HEADSTART, MAX_HEADSTART].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headstarts {
    values: Vec<u8>,
}

impl Headstarts {
    /// new creates a headstart table with the default value for each of the no_competitors
    /// drivers.
    pub fn new(no_competitors: usize) -> Headstarts {
        Headstarts {
            values: vec![DEFAULT_HEADSTART; no_competitors],
        }
    }

    /// from_map creates a headstart table from a map of driver names to headstarts. Drivers
    /// missing in the map keep the default value.
    pub fn from_map(roster: &Roster, map: &HashMap<String, i64>) -> Result<Headstarts, RaceError> {
        let mut headstarts = Headstarts::new(roster.no_competitors());

        // sort names such that the reported error does not depend on the hash map order
        let mut names: Vec<&String> = map.keys().collect();
        names.sort();

        for name in names {
            let id = roster
                .find_competitor(name)
                .ok_or_else(|| RaceError::UnknownCompetitor(name.to_owned()))?;
            headstarts.set(roster, id, map[name])?;
        }

        Ok(headstarts)
    }

    pub fn get(&self, id: CompetitorId) -> u8 {
        self.values[id.0]
    }

    /// set validates and stores the headstart of a driver. The table is not modified on error.
    pub fn set(&mut self, roster: &Roster, id: CompetitorId, value: i64) -> Result<(), RaceError> {
        if value < MIN_HEADSTART as i64 || value > MAX_HEADSTART as i64 {
            return Err(RaceError::HeadstartOutOfRange {
                competitor: roster.competitor(id).name.to_owned(),
                value,
                min: MIN_HEADSTART,
                max: MAX_HEADSTART,
            });
        }

        self.values[id.0] = value as u8;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CompetitorId, u8)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (CompetitorId(i), v))
    }
}
