pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod services;
pub mod stats;
pub mod store;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::domain::Mode;
use crate::services::{InsightsService, RecordingService, ReportingService};
use crate::stats::Window;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_record_singles(player_a: &str, player_b: &str, sets: &[String]) -> Result<()> {
    let config = AppConfig::new();
    let service = RecordingService::new(config);
    service.record_singles(player_a, player_b, sets)
}

pub fn handle_record_doubles(team_a: &[String], team_b: &[String], sets: &[String]) -> Result<()> {
    let team_a = pair(team_a)?;
    let team_b = pair(team_b)?;
    let config = AppConfig::new();
    let service = RecordingService::new(config);
    service.record_doubles(&team_a, &team_b, sets)
}

pub fn handle_leaderboard(mode: Mode, top: usize) -> Result<()> {
    let config = AppConfig::new();
    let service = ReportingService::new(config);
    service.leaderboard(mode, top)
}

pub fn handle_add_player(name: &str, singles_elo: f64, doubles_elo: f64) -> Result<()> {
    let config = AppConfig::new();
    let service = ReportingService::new(config);
    service.add_player(name, singles_elo, doubles_elo)
}

pub fn handle_show_player(name: &str) -> Result<()> {
    let config = AppConfig::new();
    let service = ReportingService::new(config);
    service.show_player(name)
}

pub fn handle_stats(
    name: &str,
    mode: Mode,
    since: Option<NaiveDate>,
    last: Option<usize>,
    h2h: Option<&str>,
) -> Result<()> {
    let config = AppConfig::new();
    let service = ReportingService::new(config);
    service.stats_card(name, mode, window_from(since, last), h2h)
}

pub fn handle_stats_leaderboard(
    mode: Mode,
    top: usize,
    momentum: bool,
    streaks: bool,
    since: Option<NaiveDate>,
    last: Option<usize>,
) -> Result<()> {
    let config = AppConfig::new();
    let service = ReportingService::new(config);
    service.stats_leaderboard(mode, top, momentum, streaks, window_from(since, last))
}

pub fn handle_insights(date: Option<NaiveDate>, outfile: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::new();
    let service = InsightsService::new(config);
    service.write_report(date, outfile)
}

// `--since` and `--last` are mutually exclusive at the CLI.
fn window_from(since: Option<NaiveDate>, last: Option<usize>) -> Option<Window> {
    match (since, last) {
        (Some(date), _) => Some(Window::Since(date)),
        (None, Some(n)) => Some(Window::LastN(n)),
        (None, None) => None,
    }
}

fn pair(names: &[String]) -> Result<[String; 2]> {
    <[String; 2]>::try_from(names.to_vec())
        .map_err(|_| anyhow!("a doubles team needs exactly two players"))
}
