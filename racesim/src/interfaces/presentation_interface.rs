use crate::core::championship::Championship;
use crate::core::increment::IncrementSource;
use crate::post::race_result::RaceResult;
use serde::Serialize;

pub const MAX_UPDATE_FREQUENCY: f64 = 20.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub position: usize,
    pub driver: String,
    pub team: String,
    pub progress: u8,
    pub finished: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RaceSnapshot {
    pub race_no: u32,
    pub tick: u32,
    pub rows: Vec<LeaderboardRow>,

    // final results payload (sent once when race finishes)
    pub final_result: Option<RaceResult>,
}

impl RaceSnapshot {
    /// from_championship captures the current leaderboard of the championship's race.
    pub fn from_championship<I: IncrementSource>(championship: &Championship<I>) -> RaceSnapshot {
        let roster = championship.roster();
        let race = championship.race();

        // a finished race is already booked, a running one is not
        let race_no = if race.is_finished() {
            championship.ledger().races_completed()
        } else {
            championship.ledger().races_completed() + 1
        };

        RaceSnapshot {
            race_no,
            tick: race.get_cur_tick(),
            rows: championship
                .current_leaderboard()
                .map(|entry| LeaderboardRow {
                    position: entry.position,
                    driver: roster.competitor(entry.competitor).name.to_owned(),
                    team: roster.team(entry.team).name.to_owned(),
                    progress: entry.progress,
                    finished: entry.finished,
                })
                .collect(),
            final_result: None,
        }
    }

    /// print_leaderboard prints a compact one-line-per-driver view of the snapshot.
    pub fn print_leaderboard(&self) {
        println!("INFO: Race {}, tick {}", self.race_no, self.tick);
        for row in self.rows.iter() {
            println!(
                "P{:<2} {:>4} {:<14} {:>3}%{}",
                row.position,
                row.driver,
                row.team,
                row.progress,
                if row.finished { " FINISHED" } else { "" }
            );
        }
    }
}
