use clap::Parser;
use racesim::core::championship::Championship;
use racesim::core::handle_race::handle_season;
use racesim::core::increment::RandomIncrements;
use racesim::pre::read_sim_pars::{read_sim_pars, SeasonPars};
use racesim::pre::sim_opts::SimOpts;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get simulation options from the command line arguments
    let sim_opts: SimOpts = SimOpts::parse();

    // logs go to stderr such that the report on stdout stays machine-readable
    let default_level = if sim_opts.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // get season parameters
    let season_pars = if let Some(parfile_path) = &sim_opts.parfile_path {
        info!("Reading season parameters from {:?}", parfile_path);
        read_sim_pars(parfile_path)?
    } else {
        info!("No parameter file given, using the 2025 grid with default headstarts");
        SeasonPars::default()
    };
    let roster = season_pars.build_roster()?;
    let headstarts = season_pars.build_headstarts(&roster)?;

    let increments = match sim_opts.seed {
        Some(seed) => RandomIncrements::seeded(seed),
        None => RandomIncrements::from_entropy(),
    };
    let mut championship = Championship::new(roster, headstarts, increments)?;

    info!(
        "Simulating a season of {} race(s) with {} drivers",
        sim_opts.no_races,
        championship.roster().no_competitors()
    );

    // EXECUTION -----------------------------------------------------------------------------------
    if !sim_opts.live {
        let t_start = Instant::now();
        let race_results = handle_season(&mut championship, sim_opts.no_races, None, Duration::ZERO)?;
        info!("Execution time: {}ms", t_start.elapsed().as_millis());

        if !sim_opts.json {
            for race_result in race_results.iter() {
                race_result.print_classification();
                println!();
            }
        }
    } else {
        // LIVE CASE - the season runs on its own thread, the main thread prints the leaderboard
        let (tx, rx) = flume::unbounded();
        let no_races = sim_opts.no_races;
        let tick_interval = Duration::from_millis(sim_opts.tick_interval_ms);

        let sim_thread = thread::spawn(move || -> anyhow::Result<_> {
            handle_season(&mut championship, no_races, Some(&tx), tick_interval)?;
            Ok(championship)
        });

        for snapshot in rx.iter() {
            if sim_opts.json {
                continue;
            }
            match &snapshot.final_result {
                Some(race_result) => {
                    race_result.print_classification();
                    println!();
                }
                None => snapshot.print_leaderboard(),
            }
        }

        championship = sim_thread
            .join()
            .map_err(|_| anyhow::anyhow!("Simulation thread panicked!"))??;
    }

    // POST-PROCESSING -----------------------------------------------------------------------------
    let season_report = championship.season_report();
    if sim_opts.json {
        println!("{}", serde_json::to_string_pretty(&season_report)?);
    } else {
        season_report.print_report();
    }

    Ok(())
}
