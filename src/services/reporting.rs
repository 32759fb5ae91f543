use anyhow::Result;
use chrono::Local;
use colored::Colorize;

use crate::config::AppConfig;
use crate::domain::{Mode, PlayerRecord};
use crate::errors::EloCampError;
use crate::stats::{self, Window};
use crate::store::JsonStore;

use super::presenter::{opponent_label, score_line};

/// Console-facing queries: leaderboards, player cards, roster edits.
pub struct ReportingService {
    store: JsonStore,
}

impl ReportingService {
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: JsonStore::new(config.store),
        }
    }

    /// Add a player with explicit starting ratings. Fails without touching
    /// the store if the name is taken.
    pub fn add_player(&self, name: &str, singles_elo: f64, doubles_elo: f64) -> Result<()> {
        let mut players = self.store.load_players();
        if players.contains_key(name) {
            return Err(EloCampError::DuplicatePlayer {
                name: name.to_string(),
            }
            .into());
        }
        let today = Local::now().date_naive();
        players.insert(
            name.to_string(),
            PlayerRecord::new(singles_elo, doubles_elo, today),
        );
        self.store.save_players(&players)?;
        println!("Added player {name} with singles Elo {singles_elo} and doubles Elo {doubles_elo}");
        Ok(())
    }

    /// Current and peak ratings for one player. An unknown name is a
    /// user-visible message, not a failure.
    pub fn show_player(&self, name: &str) -> Result<()> {
        let players = self.store.load_players();
        match players.get(name) {
            Some(p) => {
                println!("{name}:");
                println!(
                    "  Singles Elo: {:.1} (peak {:.1} on {})",
                    p.singles_elo, p.max_singles_elo, p.max_singles_date
                );
                println!(
                    "  Doubles Elo: {:.1} (peak {:.1} on {})",
                    p.doubles_elo, p.max_doubles_elo, p.max_doubles_date
                );
            }
            None => println!("Player '{name}' not found."),
        }
        Ok(())
    }

    pub fn leaderboard(&self, mode: Mode, top: usize) -> Result<()> {
        let players = self.store.load_players();
        println!("{}", format!("{} Leaderboard:", mode.title()).bold());
        for (name, rating) in stats::leaderboard(&players, mode, top) {
            println!("{name}: {rating:.1}");
        }
        Ok(())
    }

    /// Per-player stats card: record, streaks, momentum over a window,
    /// recent results, and an optional head-to-head block.
    pub fn stats_card(
        &self,
        name: &str,
        mode: Mode,
        window: Option<Window>,
        h2h: Option<&str>,
    ) -> Result<()> {
        let players = self.store.load_players();
        let Some(player) = players.get(name) else {
            return Err(EloCampError::PlayerNotFound {
                name: name.to_string(),
            }
            .into());
        };

        let history = self.store.load_history();
        let entries = stats::player_entries(&history, name, mode);
        let recent = stats::windowed(entries, window);
        let momentum = stats::momentum(&recent, name, mode);

        let (peak, peak_date) = player.peak(mode);
        let c = player.counters.mode(mode);

        println!("{}", format!("{name} - {}", mode.title()).bold());
        println!(
            "Rating {:.2} | Peak {peak:.2} ({peak_date})",
            player.rating(mode)
        );
        println!(
            "Matches {}-{} | Sets {}-{}",
            c.matches_won,
            c.matches_played - c.matches_won,
            c.sets_won,
            c.sets_played - c.sets_won
        );
        println!(
            "Streak {} (Best {})",
            c.current_win_streak, c.best_win_streak
        );
        let tb_pct = if c.tiebreaks_played > 0 {
            100.0 * c.tiebreaks_won as f64 / c.tiebreaks_played as f64
        } else {
            0.0
        };
        println!(
            "Tiebreaks {}-{} ({tb_pct:.0}%)",
            c.tiebreaks_won,
            c.tiebreaks_played - c.tiebreaks_won
        );
        println!(
            "Bagels {} given / {} taken",
            c.bagels_given, c.bagels_taken
        );
        match window {
            Some(Window::Since(date)) => println!("Momentum since {date}: {momentum:+.1}"),
            Some(Window::LastN(n)) => println!("Momentum (last {n}): {momentum:+.1}"),
            None => println!("Momentum (last 5): {momentum:+.1}"),
        }

        println!("Recent:");
        for entry in &recent {
            println!(
                "  {} vs {:<18} {:<24} (d {:+.1})",
                entry.result_for(name).letter(),
                opponent_label(entry, name),
                score_line(&entry.sets),
                entry.delta_for(name, mode)
            );
        }

        if let Some(opponent) = h2h {
            if !players.contains_key(opponent) {
                println!("\n(H2H) Opponent '{opponent}' not found.");
            } else {
                let h = stats::head_to_head(&history, name, opponent, mode);
                println!("\nHead-to-head vs {opponent}:");
                println!(
                    "  Matches {}-{} | Sets {}-{}",
                    h.wins,
                    h.matches - h.wins,
                    h.sets_won,
                    h.sets_lost
                );
                if let Some(last) = h.last {
                    println!(
                        "  Last: {} {} (d {:+.1})",
                        last.result_for(name).letter(),
                        score_line(&last.sets),
                        last.delta_for(name, mode)
                    );
                }
            }
        }
        Ok(())
    }

    /// Extended leaderboard with optional movers and streak sections.
    pub fn stats_leaderboard(
        &self,
        mode: Mode,
        top: usize,
        momentum: bool,
        streaks: bool,
        window: Option<Window>,
    ) -> Result<()> {
        let players = self.store.load_players();

        println!(
            "{}",
            format!("{} Leaderboard (Top {top}):", mode.title()).bold()
        );
        for (rank, (name, rating)) in stats::leaderboard(&players, mode, top).iter().enumerate() {
            println!("{:>2}. {name:<12} {rating:.2}", rank + 1);
        }

        if momentum {
            let history = self.store.load_history();
            let movers = stats::movers_over_window(&players, &history, mode, window);

            println!("\n{}", "Biggest Movers:".bold());
            for (rank, row) in movers.iter().take(10).enumerate() {
                println!(" +{}) {:<12} {:+.1}", rank + 1, row.name, row.delta);
            }

            let mut droppers = movers;
            droppers.sort_by(|a, b| a.delta.total_cmp(&b.delta));
            println!("\n{}", "Biggest Droppers:".bold());
            for (rank, row) in droppers.iter().take(10).enumerate() {
                println!(" -{}) {:<12} {:+.1}", rank + 1, row.name, row.delta);
            }
        }

        if streaks {
            println!("\n{}", "Active Win Streaks:".bold());
            for (rank, (streak, name)) in stats::streak_snapshot(&players, mode)
                .iter()
                .take(10)
                .enumerate()
            {
                println!(" {:>2}. {name:<12} {streak}", rank + 1);
            }
        }
        Ok(())
    }
}
