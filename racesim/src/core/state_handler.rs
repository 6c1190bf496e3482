use crate::error::RaceError;

/// RacePhase is the life cycle of a single race:
/// `Idle -> Active (start) -> Active (tick, repeated) -> Finished (last driver finishes) -> Active
/// (start again)`. An active race can be abandoned, which returns to Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    Idle,
    Active,
    Finished,
}

impl Default for RacePhase {
    fn default() -> Self {
        RacePhase::Idle
    }
}

/// StateHandler guards the phase transitions of the race engine. Invalid requests from outside are
/// rejected with an error and leave the phase untouched.
#[derive(Debug, Default)]
pub struct StateHandler {
    state: RacePhase,
}

impl StateHandler {
    pub fn get_phase(&self) -> RacePhase {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, RacePhase::Active)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, RacePhase::Finished)
    }

    /// act_race switches to the active phase. Not allowed while a race is running.
    pub fn act_race(&mut self) -> Result<(), RaceError> {
        match self.state {
            RacePhase::Active => Err(RaceError::RaceInProgress),
            RacePhase::Idle | RacePhase::Finished => {
                self.state = RacePhase::Active;
                Ok(())
            }
        }
    }

    /// check_tick_allowed returns an error if no race is running.
    pub fn check_tick_allowed(&self) -> Result<(), RaceError> {
        match self.state {
            RacePhase::Active => Ok(()),
            RacePhase::Idle | RacePhase::Finished => Err(RaceError::NoRaceRunning),
        }
    }

    /// finish_race switches from the active to the finished phase. Only the engine calls this,
    /// calling it in any other phase is a bug.
    pub fn finish_race(&mut self) {
        if !self.is_active() {
            panic!("Tried to finish a race without an active race!")
        }

        self.state = RacePhase::Finished;
    }

    /// abandon_race drops an active race and returns to idle. Returns false if there was nothing
    /// to abandon.
    pub fn abandon_race(&mut self) -> bool {
        if self.is_active() {
            self.state = RacePhase::Idle;
            true
        } else {
            false
        }
    }
}
