use crate::core::championship::Championship;
use crate::core::increment::IncrementSource;
use crate::interfaces::presentation_interface::{RaceSnapshot, MAX_UPDATE_FREQUENCY};
use crate::post::race_result::RaceResult;
use anyhow::Context;
use flume::Sender;
use std::thread::sleep;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// handle_race simulates one complete race of the championship and returns its classification.
/// If a sender is inserted, the race runs in real time: every tick takes `tick_interval` and
/// leaderboard snapshots are sent at up to MAX_UPDATE_FREQUENCY, followed by a final snapshot
/// carrying the race result.
pub fn handle_race<I: IncrementSource>(
    championship: &mut Championship<I>,
    tx: Option<&Sender<RaceSnapshot>>,
    tick_interval: Duration,
) -> anyhow::Result<RaceResult> {
    championship
        .start_race()
        .context("Failed to start the race!")?;

    match tx {
        None => {
            while championship.race().is_active() {
                championship.tick().context("Failed to simulate tick!")?;
            }
        }
        Some(tx) => {
            let min_update_interval = Duration::from_secs_f64(1.0 / MAX_UPDATE_FREQUENCY);
            let mut t_last_update: Option<Instant> = None;

            tx.send(RaceSnapshot::from_championship(championship))
                .context("Failed to send race snapshot!")?;

            while championship.race().is_active() {
                let t_start = Instant::now();
                championship.tick().context("Failed to simulate tick!")?;

                if t_last_update.map_or(true, |t| t.elapsed() >= min_update_interval)
                    && championship.race().is_active()
                {
                    tx.send(RaceSnapshot::from_championship(championship))
                        .context("Failed to send race snapshot!")?;
                    t_last_update = Some(Instant::now());
                }

                // sleep until the tick is finished in real time as well
                match tick_interval.checked_sub(t_start.elapsed()) {
                    Some(t_sleep) if championship.race().is_active() => sleep(t_sleep),
                    Some(_) => {}
                    None => warn!("Could not keep up with real time!"),
                }
            }
        }
    }

    let result = championship
        .race_result()
        .context("Race ended without a result!")?;

    // after the race loop finishes, send the final result once
    if let Some(tx) = tx {
        let mut final_msg = RaceSnapshot::from_championship(championship);
        final_msg.final_result = Some(result.clone());
        tx.send(final_msg)
            .context("Failed to send final race result!")?;
    }

    info!(
        "Race {} finished after {} ticks",
        result.race_no, result.no_ticks
    );
    Ok(result)
}

/// handle_season runs `no_races` races one after another and returns all race results.
pub fn handle_season<I: IncrementSource>(
    championship: &mut Championship<I>,
    no_races: u32,
    tx: Option<&Sender<RaceSnapshot>>,
    tick_interval: Duration,
) -> anyhow::Result<Vec<RaceResult>> {
    let mut results = Vec::with_capacity(no_races as usize);

    for race_idx in 0..no_races {
        debug!("Simulating race {} of {}", race_idx + 1, no_races);
        results.push(handle_race(championship, tx, tick_interval)?);
    }

    Ok(results)
}
