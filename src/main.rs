use anyhow::Result;

use elo_camp::cli::Command;
use elo_camp::{
    handle_add_player, handle_insights, handle_leaderboard, handle_record_doubles,
    handle_record_singles, handle_show_player, handle_stats, handle_stats_leaderboard, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::RecordSingles {
            player_a,
            player_b,
            sets,
        } => handle_record_singles(player_a, player_b, sets),
        Command::RecordDoubles {
            team_a,
            team_b,
            sets,
        } => handle_record_doubles(team_a, team_b, sets),
        Command::Leaderboard { mode, top } => handle_leaderboard(*mode, *top),
        Command::AddPlayer {
            name,
            singles_elo,
            doubles_elo,
        } => handle_add_player(name, *singles_elo, *doubles_elo),
        Command::ShowPlayer { name } => handle_show_player(name),
        Command::Stats {
            name,
            mode,
            since,
            last,
            h2h,
        } => handle_stats(name, *mode, *since, *last, h2h.as_deref()),
        Command::StatsLeaderboard {
            mode,
            top,
            momentum,
            streaks,
            since,
            last,
        } => handle_stats_leaderboard(*mode, *top, *momentum, *streaks, *since, *last),
        Command::Insights { date, outfile } => handle_insights(*date, outfile.clone()),
    }
}
