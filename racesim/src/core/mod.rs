pub mod awards;
pub mod championship;
pub mod handle_race;
pub mod headstart;
pub mod increment;
pub mod race;
pub mod rating;
pub mod roster;
pub mod scoring;
pub mod season;
pub mod standings;
pub mod state_handler;
