use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::info;

use crate::config::AppConfig;
use crate::domain::{MatchRecord, Mode, PlayerBook, Side};
use crate::stats;
use crate::store::JsonStore;

use super::presenter::{names_label, score_line};

/// Writes the end-of-day report file: leaderboards, movers, streaks,
/// the match log, and highlights for one date.
pub struct InsightsService {
    store: JsonStore,
}

impl InsightsService {
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: JsonStore::new(config.store),
        }
    }

    pub fn write_report(&self, date: Option<NaiveDate>, outfile: Option<PathBuf>) -> Result<()> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let path = outfile.unwrap_or_else(|| PathBuf::from(format!("insights_{date}.txt")));

        let players = self.store.load_players();
        let history = self.store.load_history();

        let report = render_report(&players, &history, date);
        fs::write(&path, report)
            .with_context(|| format!("Failed to write report {}", path.display()))?;

        info!("Wrote insights report for {date}");
        println!("Insights written to {}", path.display());
        Ok(())
    }
}

fn render_report(players: &PlayerBook, history: &[MatchRecord], date: NaiveDate) -> String {
    let mut out = String::new();

    heading(&mut out, &format!("Elo Camp Insights - {date}"));

    for mode in [Mode::Singles, Mode::Doubles] {
        section(&mut out, &format!("{} Leaderboard", mode.title()));
        let rows = stats::leaderboard(players, mode, players.len());
        if rows.is_empty() {
            let _ = writeln!(out, "  (no players)");
        }
        for (rank, (name, rating)) in rows.iter().enumerate() {
            let _ = writeln!(out, "  {:>2}. {name:<16} {rating:8.2}", rank + 1);
        }
    }

    for mode in [Mode::Singles, Mode::Doubles] {
        let movers = stats::daily_movers(history, mode, date);
        let (risers, sliders) = stats::split_risers_sliders(&movers);

        section(&mut out, &format!("{} Risers & Sliders", mode.title()));
        let _ = writeln!(out, "  Top Risers:");
        if risers.is_empty() {
            let _ = writeln!(out, "    (none)");
        }
        for row in risers.iter().take(10) {
            let _ = writeln!(out, "    {:<16} {:+7.1}", row.name, row.delta);
        }
        let _ = writeln!(out, "  Top Sliders:");
        if sliders.is_empty() {
            let _ = writeln!(out, "    (none)");
        }
        for row in sliders.iter().take(10) {
            let _ = writeln!(out, "    {:<16} {:+7.1}", row.name, row.delta);
        }
    }

    for mode in [Mode::Singles, Mode::Doubles] {
        section(&mut out, &format!("{} Active Win Streaks", mode.title()));
        let active: Vec<_> = stats::streak_snapshot(players, mode)
            .into_iter()
            .filter(|(streak, _)| *streak > 0)
            .take(10)
            .collect();
        if active.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for (streak, name) in active {
            let _ = writeln!(out, "  {name:<16} {streak} in a row");
        }
    }

    section(&mut out, "Daily Stats");
    let day = stats::daily_stats(history, date);
    let _ = writeln!(
        out,
        "  Matches: {} singles, {} doubles",
        day.singles_matches, day.doubles_matches
    );
    let _ = writeln!(
        out,
        "  Sets: {} ({} tiebreaks, {} bagels)",
        day.sets_total, day.tiebreaks, day.bagels
    );
    let _ = writeln!(out, "  Players on court: {}", day.participants);

    section(&mut out, "Match Log");
    let entries = stats::day_entries(history, date);
    if entries.is_empty() {
        let _ = writeln!(out, "  (no matches recorded)");
    }
    for entry in &entries {
        let _ = writeln!(out, "  {}", match_line(entry));
    }

    section(&mut out, "Highlights");
    let upsets = stats::upsets(history, date);
    if upsets.is_empty() {
        let _ = writeln!(out, "  (no upsets)");
    }
    for upset in &upsets {
        let _ = writeln!(
            out,
            "  UPSET ({}): {} def. {} {} (expected {:.0}%, {:+.1})",
            upset.mode.title(),
            names_label(&upset.winners),
            names_label(&upset.losers),
            score_line(&upset.sets),
            upset.expectation * 100.0,
            upset.delta
        );
    }

    section(&mut out, "Records & Milestones");
    let milestones = stats::peak_milestones(players, date);
    if milestones.is_empty() {
        let _ = writeln!(out, "  (none today)");
    }
    for m in &milestones {
        let _ = writeln!(
            out,
            "  {} hit a new {} peak: {:.1}",
            m.name,
            m.mode.title().to_lowercase(),
            m.rating
        );
    }

    out
}

fn match_line(entry: &MatchRecord) -> String {
    let label = format!(
        "{} vs {}",
        names_label(entry.participants.side_names(Side::A)),
        names_label(entry.participants.side_names(Side::B)),
    );
    let result = match entry.winner {
        Some(side) => format!(
            "{} won",
            names_label(entry.participants.side_names(side))
        ),
        None => "tie".to_string(),
    };

    let mut flags = Vec::new();
    if entry.decided_by_tiebreak {
        flags.push("decided by tiebreak");
    }
    if entry.comeback_win {
        flags.push("comeback win");
    }
    let suffix = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };

    format!(
        "[{}] {label}: {} ({result}){suffix}",
        entry.mode().title(),
        score_line(&entry.sets)
    )
}

fn heading(out: &mut String, text: &str) {
    let _ = writeln!(out, "{text}");
    let _ = writeln!(out, "{}", "=".repeat(text.len()));
}

fn section(out: &mut String, text: &str) {
    let _ = writeln!(out, "\n{text}");
    let _ = writeln!(out, "{}", "-".repeat(text.len()));
}
