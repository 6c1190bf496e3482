use thiserror::Error;

/// RaceError is returned whenever a call violates a precondition of the race engine or the
/// championship configuration. None of these errors leave any state modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RaceError {
    #[error("Race already in progress")]
    RaceInProgress,
    #[error("No race running")]
    NoRaceRunning,
    #[error("Headstart {value} for driver {competitor} is outside of [{min}, {max}]")]
    HeadstartOutOfRange {
        competitor: String,
        value: i64,
        min: u8,
        max: u8,
    },
    #[error("Unknown driver {0}")]
    UnknownCompetitor(String),
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),
}
