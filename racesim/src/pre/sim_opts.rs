use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    author = "Alexander Heilmeier <alexander.heilmeier@tum.de>",
    name = "RS-CHAMP",
    about = "A race progression and championship simulator written in Rust"
)]
pub struct SimOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug logging (overridden by RUST_LOG if set)
    #[clap(short, long)]
    pub debug: bool,

    /// Activate live mode - races are simulated in real time with a live leaderboard
    #[clap(short, long)]
    pub live: bool,

    /// Print the season report as JSON instead of text tables
    #[clap(short, long)]
    pub json: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set number of races in the season
    #[clap(short, long, default_value = "1")]
    pub no_races: u32,

    /// Set path to the season parameter file (OPTIONAL: if not set, the 2025 grid is used with
    /// default headstarts)
    #[clap(short, long)]
    pub parfile_path: Option<PathBuf>,

    /// Set seed of the random number generator to get reproducible seasons
    #[clap(short, long)]
    pub seed: Option<u64>,

    /// Set duration of a single tick in milliseconds (only relevant in live mode)
    #[clap(short, long, default_value = "50")]
    pub tick_interval_ms: u64,
}
