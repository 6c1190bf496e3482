pub mod race_result;
pub mod season_report;
