use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::Mode;

#[derive(Parser, Debug)]
#[command(author, version, about = "elo-camp tennis rating tracker")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Record a singles series of sets between two players
    RecordSingles {
        player_a: String,
        player_b: String,
        /// Set scores like 6-3 7-6 10-8[tiebreak]
        #[arg(required = true, num_args = 1..)]
        sets: Vec<String>,
    },
    /// Record a doubles series between two teams of two
    RecordDoubles {
        /// Team A as two player names
        #[arg(num_args = 2)]
        team_a: Vec<String>,
        /// Team B as two player names
        #[arg(num_args = 2)]
        team_b: Vec<String>,
        /// Set scores like 6-3 7-6 10-8[tiebreak]
        #[arg(required = true, num_args = 1..)]
        sets: Vec<String>,
    },
    /// Show the top players by current rating
    Leaderboard {
        /// Rating mode to rank by
        #[arg(short, long, value_enum, default_value_t = Mode::Singles)]
        mode: Mode,
        /// Number of players to show
        #[arg(short, long, default_value_t = 10)]
        top: usize,
    },
    /// Add a player with explicit starting ratings
    AddPlayer {
        name: String,
        #[arg(long, default_value_t = 1000.0)]
        singles_elo: f64,
        #[arg(long, default_value_t = 1000.0)]
        doubles_elo: f64,
    },
    /// Show one player's current and peak ratings
    ShowPlayer { name: String },
    /// Per-player stats card: record, streaks, momentum, recent results
    Stats {
        name: String,
        #[arg(short, long, value_enum, default_value_t = Mode::Singles)]
        mode: Mode,
        /// Only count matches on or after this date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "last")]
        since: Option<NaiveDate>,
        /// Only count the last N matches
        #[arg(long)]
        last: Option<usize>,
        /// Add a head-to-head block against this opponent
        #[arg(long)]
        h2h: Option<String>,
    },
    /// Extended leaderboard with optional movers and streak sections
    StatsLeaderboard {
        #[arg(short, long, value_enum, default_value_t = Mode::Singles)]
        mode: Mode,
        #[arg(short, long, default_value_t = 10)]
        top: usize,
        /// Include biggest movers and droppers over the window
        #[arg(long)]
        momentum: bool,
        /// Include the active win streak table
        #[arg(long)]
        streaks: bool,
        /// Momentum window start date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "last")]
        since: Option<NaiveDate>,
        /// Momentum window as the last N matches per player
        #[arg(long)]
        last: Option<usize>,
    },
    /// Write the daily insights report file
    Insights {
        /// Report date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output path (defaults to insights_<date>.txt)
        #[arg(long)]
        outfile: Option<PathBuf>,
    },
}
