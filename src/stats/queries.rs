//! Read-only aggregation over the match ledger and current player state.
//! Every function is a pure fold over its inputs; nothing here mutates.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::types::{
    DEFAULT_WINDOW_MATCHES, DailyStats, HeadToHead, MoverRow, PeakMilestone, Upset, Window,
};
use crate::domain::{MatchOutcome, MatchRecord, Mode, PlayerBook, SetKind, Side};
use crate::rating::math::expected_score;

/// Winner expectation at or below this flags an upset.
const UPSET_MAX_EXPECTATION: f64 = 0.35;
/// Winner trailing the loser by at least this many points flags an upset.
const UPSET_RATING_GAP: f64 = 100.0;

/// Top players by current rating, descending. The sort is stable, so ties
/// keep the book's iteration order.
pub fn leaderboard(players: &PlayerBook, mode: Mode, top: usize) -> Vec<(&String, f64)> {
    let mut rows: Vec<_> = players.iter().map(|(n, p)| (n, p.rating(mode))).collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));
    rows.truncate(top);
    rows
}

/// Ledger entries for one player in one mode, newest first.
pub fn player_entries<'a>(
    history: &'a [MatchRecord],
    name: &str,
    mode: Mode,
) -> Vec<&'a MatchRecord> {
    let mut entries: Vec<_> = history
        .iter()
        .filter(|e| e.mode() == mode && e.involves(name))
        .collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries
}

/// Restrict a newest-first entry list to the requested window.
pub fn windowed<'a>(
    mut entries: Vec<&'a MatchRecord>,
    window: Option<Window>,
) -> Vec<&'a MatchRecord> {
    match window {
        Some(Window::Since(date)) => entries.retain(|e| e.date >= date),
        Some(Window::LastN(n)) => entries.truncate(n),
        None => entries.truncate(DEFAULT_WINDOW_MATCHES),
    }
    entries
}

/// Summed Elo delta for a player over a window of entries.
pub fn momentum(entries: &[&MatchRecord], name: &str, mode: Mode) -> f64 {
    entries.iter().map(|e| e.delta_for(name, mode)).sum()
}

/// All entries recorded on one date, in ledger order.
pub fn day_entries<'a>(history: &'a [MatchRecord], date: NaiveDate) -> Vec<&'a MatchRecord> {
    history.iter().filter(|e| e.date == date).collect()
}

/// Per-player summed deltas for one day, largest gain first.
pub fn daily_movers(history: &[MatchRecord], mode: Mode, date: NaiveDate) -> Vec<MoverRow> {
    let mut deltas: BTreeMap<&String, f64> = BTreeMap::new();
    for entry in day_entries(history, date) {
        if entry.mode() != mode {
            continue;
        }
        for (name, delta) in &entry.elo_change {
            *deltas.entry(name).or_insert(0.0) += delta;
        }
    }
    let mut rows: Vec<MoverRow> = deltas
        .into_iter()
        .map(|(name, delta)| MoverRow {
            name: name.clone(),
            delta,
        })
        .collect();
    rows.sort_by(|a, b| b.delta.total_cmp(&a.delta));
    rows
}

/// Partition movers into risers (delta > 0, as given) and sliders
/// (delta < 0, worst first). Zero-delta rows drop out.
pub fn split_risers_sliders(rows: &[MoverRow]) -> (Vec<MoverRow>, Vec<MoverRow>) {
    let risers = rows.iter().filter(|r| r.delta > 0.0).cloned().collect();
    let mut sliders: Vec<MoverRow> = rows.iter().filter(|r| r.delta < 0.0).cloned().collect();
    sliders.sort_by(|a, b| a.delta.total_cmp(&b.delta));
    (risers, sliders)
}

/// Momentum per player over a window, biggest gainers first. Players with
/// no entries in the window are omitted.
pub fn movers_over_window(
    players: &PlayerBook,
    history: &[MatchRecord],
    mode: Mode,
    window: Option<Window>,
) -> Vec<MoverRow> {
    let mut rows = Vec::new();
    for name in players.keys() {
        let entries = windowed(player_entries(history, name, mode), window);
        if entries.is_empty() {
            continue;
        }
        rows.push(MoverRow {
            name: name.clone(),
            delta: momentum(&entries, name, mode),
        });
    }
    rows.sort_by(|a, b| b.delta.total_cmp(&a.delta));
    rows
}

/// Current win streak per player: streak descending, name ascending within
/// equal streaks. Reports rely on this exact tie-break.
pub fn streak_snapshot(players: &PlayerBook, mode: Mode) -> Vec<(u32, String)> {
    let mut rows: Vec<(u32, String)> = players
        .iter()
        .map(|(name, p)| (p.counters.mode(mode).current_win_streak, name.clone()))
        .collect();
    rows.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    rows
}

/// Match and set record between two players across shared entries.
pub fn head_to_head<'a>(
    history: &'a [MatchRecord],
    name: &str,
    opponent: &str,
    mode: Mode,
) -> HeadToHead<'a> {
    let entries: Vec<_> = player_entries(history, name, mode)
        .into_iter()
        .filter(|e| e.involves(opponent))
        .collect();

    let mut h2h = HeadToHead {
        matches: entries.len() as u32,
        wins: entries
            .iter()
            .filter(|e| e.result_for(name) == MatchOutcome::Win)
            .count() as u32,
        sets_won: 0,
        sets_lost: 0,
        last: entries.first().copied(),
    };

    for entry in &entries {
        let Some(side) = entry.participants.side_of(name) else {
            continue;
        };
        for set in &entry.sets {
            match set.winner() {
                Some(w) if w == side => h2h.sets_won += 1,
                Some(_) => h2h.sets_lost += 1,
                None => {}
            }
        }
    }
    h2h
}

/// Upsets among one day's entries: the winner's pre-match expectation was
/// at most 0.35, or the winner trailed the loser by 100+ points.
pub fn upsets(history: &[MatchRecord], date: NaiveDate) -> Vec<Upset> {
    let mut found = Vec::new();
    for entry in day_entries(history, date) {
        let Some(winner) = entry.winner else {
            continue;
        };
        let rating_w = entry.side_rating_before(winner);
        let rating_l = entry.side_rating_before(winner.other());
        let expectation = expected_score(rating_w, rating_l);

        if expectation <= UPSET_MAX_EXPECTATION || rating_w + UPSET_RATING_GAP <= rating_l {
            found.push(Upset {
                mode: entry.mode(),
                winners: entry.participants.side_names(winner).to_vec(),
                losers: entry.participants.side_names(winner.other()).to_vec(),
                expectation,
                delta: entry.side_delta(winner),
                sets: entry.sets.clone(),
            });
        }
    }
    found
}

/// Counts of matches, sets, tiebreaks, bagels, and distinct participants
/// for one date.
pub fn daily_stats(history: &[MatchRecord], date: NaiveDate) -> DailyStats {
    let mut stats = DailyStats::default();
    let mut participants: BTreeSet<&String> = BTreeSet::new();

    for entry in day_entries(history, date) {
        match entry.mode() {
            Mode::Singles => stats.singles_matches += 1,
            Mode::Doubles => stats.doubles_matches += 1,
        }
        stats.sets_total += entry.sets.len() as u32;
        stats.tiebreaks += entry
            .sets
            .iter()
            .filter(|s| s.kind == SetKind::Tiebreak)
            .count() as u32;
        stats.bagels += entry.sets.iter().filter(|s| s.is_bagel()).count() as u32;
        participants.extend(entry.participants.all_names());
    }
    stats.participants = participants.len();
    stats
}

/// Players whose recorded peak date matches the report date.
pub fn peak_milestones(players: &PlayerBook, date: NaiveDate) -> Vec<PeakMilestone> {
    let mut milestones = Vec::new();
    for (name, p) in players {
        if p.max_singles_date == date {
            milestones.push(PeakMilestone {
                name: name.clone(),
                mode: Mode::Singles,
                rating: p.max_singles_elo,
            });
        }
        if p.max_doubles_date == date {
            milestones.push(PeakMilestone {
                name: name.clone(),
                mode: Mode::Doubles,
                rating: p.max_doubles_elo,
            });
        }
    }
    milestones
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Participants, PlayerRecord, SetResult, ensure_player};
    use std::collections::BTreeMap;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn singles_entry(
        ts: &str,
        date: &str,
        a: &str,
        b: &str,
        sets: Vec<SetResult>,
        winner: Option<Side>,
        delta_a: f64,
        before_a: f64,
        before_b: f64,
    ) -> MatchRecord {
        MatchRecord {
            timestamp: ts.to_string(),
            date: day(date),
            participants: Participants::Singles {
                players: [a.to_string(), b.to_string()],
            },
            sets,
            winner,
            decided_by_tiebreak: false,
            comeback_win: false,
            elos_before: BTreeMap::from([(a.to_string(), before_a), (b.to_string(), before_b)]),
            elos_after: BTreeMap::new(),
            elo_change: BTreeMap::from([(a.to_string(), delta_a), (b.to_string(), -delta_a)]),
        }
    }

    fn set(a: u32, b: u32) -> SetResult {
        SetResult::new(a, b, SetKind::Set)
    }

    #[test]
    fn leaderboard_sorts_descending_with_stable_ties() {
        let mut book = PlayerBook::new();
        let today = day("2025-06-01");
        ensure_player(&mut book, "Cara", today).singles_elo = 1100.0;
        ensure_player(&mut book, "Alice", today).singles_elo = 1000.0;
        ensure_player(&mut book, "Bob", today).singles_elo = 1000.0;

        let rows = leaderboard(&book, Mode::Singles, 10);
        let names: Vec<&str> = rows.iter().map(|(n, _)| n.as_str()).collect();
        // Ties keep the book's (name-ordered) iteration order.
        assert_eq!(names, ["Cara", "Alice", "Bob"]);

        assert_eq!(leaderboard(&book, Mode::Singles, 2).len(), 2);
    }

    #[test]
    fn player_entries_are_mode_filtered_and_newest_first() {
        let history = vec![
            singles_entry("t1", "2025-06-01", "Alice", "Bob", vec![], None, 0.0, 1000.0, 1000.0),
            singles_entry("t3", "2025-06-03", "Alice", "Cara", vec![], None, 0.0, 1000.0, 1000.0),
            singles_entry("t2", "2025-06-02", "Cara", "Bob", vec![], None, 0.0, 1000.0, 1000.0),
        ];

        let entries = player_entries(&history, "Alice", Mode::Singles);
        let stamps: Vec<&str> = entries.iter().map(|e| e.timestamp.as_str()).collect();
        assert_eq!(stamps, ["t3", "t1"]);
        assert!(player_entries(&history, "Alice", Mode::Doubles).is_empty());
    }

    #[test]
    fn windows_are_mutually_exclusive_views() {
        let history: Vec<MatchRecord> = (1..=8)
            .map(|i| {
                singles_entry(
                    &format!("t{i}"),
                    &format!("2025-06-0{i}"),
                    "Alice",
                    "Bob",
                    vec![],
                    None,
                    1.0,
                    1000.0,
                    1000.0,
                )
            })
            .collect();
        let entries = player_entries(&history, "Alice", Mode::Singles);

        assert_eq!(windowed(entries.clone(), None).len(), 5);
        assert_eq!(windowed(entries.clone(), Some(Window::LastN(2))).len(), 2);
        let since = windowed(entries, Some(Window::Since(day("2025-06-06"))));
        assert_eq!(since.len(), 3);
        assert_eq!(momentum(&since, "Alice", Mode::Singles), 3.0);
    }

    #[test]
    fn daily_movers_split_into_risers_and_sliders() {
        let history = vec![
            singles_entry("t1", "2025-06-01", "Alice", "Bob", vec![], Some(Side::A), 12.0, 1000.0, 1000.0),
            singles_entry("t2", "2025-06-01", "Cara", "Bob", vec![], Some(Side::A), 4.0, 1000.0, 1000.0),
            singles_entry("t3", "2025-06-02", "Alice", "Cara", vec![], Some(Side::A), 9.0, 1000.0, 1000.0),
        ];

        let rows = daily_movers(&history, Mode::Singles, day("2025-06-01"));
        assert_eq!(rows[0].name, "Alice");
        assert_eq!(rows[0].delta, 12.0);
        // Bob lost both entries that day.
        assert_eq!(rows.last().unwrap().name, "Bob");
        assert_eq!(rows.last().unwrap().delta, -16.0);

        let (risers, sliders) = split_risers_sliders(&rows);
        assert_eq!(risers.len(), 2);
        assert_eq!(sliders.len(), 1);
        assert_eq!(sliders[0].name, "Bob");
    }

    #[test]
    fn movers_over_window_skips_idle_players() {
        let mut book = PlayerBook::new();
        let today = day("2025-06-01");
        ensure_player(&mut book, "Alice", today);
        ensure_player(&mut book, "Bob", today);
        ensure_player(&mut book, "Idle", today);

        let history = vec![singles_entry(
            "t1", "2025-06-01", "Alice", "Bob", vec![], Some(Side::A), 8.0, 1000.0, 1000.0,
        )];

        let rows = movers_over_window(&book, &history, Mode::Singles, None);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob"]);
        assert_eq!(rows[0].delta, 8.0);
    }

    #[test]
    fn streak_snapshot_breaks_ties_by_name_ascending() {
        let mut book = PlayerBook::new();
        let today = day("2025-06-01");
        for (name, streak) in [("Zoe", 2), ("Amy", 2), ("Bob", 5)] {
            ensure_player(&mut book, name, today)
                .counters
                .singles
                .current_win_streak = streak;
        }

        let rows = streak_snapshot(&book, Mode::Singles);
        let order: Vec<(u32, &str)> = rows.iter().map(|(s, n)| (*s, n.as_str())).collect();
        assert_eq!(order, [(5, "Bob"), (2, "Amy"), (2, "Zoe")]);
    }

    #[test]
    fn head_to_head_counts_matches_and_sets() {
        let history = vec![
            singles_entry(
                "t1", "2025-06-01", "Alice", "Bob",
                vec![set(6, 3), set(4, 6), set(6, 2)],
                Some(Side::A), 10.0, 1000.0, 1000.0,
            ),
            singles_entry(
                "t2", "2025-06-02", "Bob", "Alice",
                vec![set(6, 4)],
                Some(Side::A), 8.0, 1000.0, 1000.0,
            ),
            // Different opponent, must not count.
            singles_entry("t3", "2025-06-03", "Alice", "Cara", vec![set(6, 0)], Some(Side::A), 9.0, 1000.0, 1000.0),
        ];

        let h2h = head_to_head(&history, "Alice", "Bob", Mode::Singles);
        assert_eq!(h2h.matches, 2);
        assert_eq!(h2h.wins, 1);
        assert_eq!(h2h.sets_won, 2);
        assert_eq!(h2h.sets_lost, 2);
        assert_eq!(h2h.last.unwrap().timestamp, "t2");
    }

    #[test]
    fn upset_flags_low_expectation_or_big_gap() {
        let history = vec![
            // 150-point underdog wins: both conditions fire.
            singles_entry("t1", "2025-06-01", "Alice", "Bob", vec![set(6, 4)], Some(Side::A), 14.0, 900.0, 1050.0),
            // Favorite wins: no upset.
            singles_entry("t2", "2025-06-01", "Cara", "Dan", vec![set(6, 1)], Some(Side::A), 3.0, 1200.0, 1000.0),
            // Tie: never an upset.
            singles_entry("t3", "2025-06-01", "Eve", "Fay", vec![set(6, 6)], None, 0.0, 900.0, 1100.0),
        ];

        let found = upsets(&history, day("2025-06-01"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].winners, ["Alice"]);
        assert_eq!(found[0].losers, ["Bob"]);
        assert!(found[0].expectation < 0.5);
        assert_eq!(found[0].delta, 14.0);
    }

    #[test]
    fn daily_stats_count_sets_tiebreaks_bagels_and_people() {
        let mut tb_entry = singles_entry(
            "t2", "2025-06-01", "Cara", "Dan",
            vec![SetResult::new(10, 8, SetKind::Tiebreak)],
            Some(Side::A), 4.0, 1000.0, 1000.0,
        );
        tb_entry.participants = Participants::Doubles {
            teams: [
                ["Cara".to_string(), "Dan".to_string()],
                ["Eve".to_string(), "Fay".to_string()],
            ],
        };
        let history = vec![
            singles_entry("t1", "2025-06-01", "Alice", "Bob", vec![set(6, 0), set(7, 5)], Some(Side::A), 10.0, 1000.0, 1000.0),
            tb_entry,
            singles_entry("t3", "2025-06-09", "Alice", "Bob", vec![set(6, 0)], Some(Side::A), 10.0, 1000.0, 1000.0),
        ];

        let stats = daily_stats(&history, day("2025-06-01"));
        assert_eq!(stats.singles_matches, 1);
        assert_eq!(stats.doubles_matches, 1);
        assert_eq!(stats.sets_total, 3);
        assert_eq!(stats.tiebreaks, 1);
        assert_eq!(stats.bagels, 1);
        assert_eq!(stats.participants, 6);
    }

    #[test]
    fn milestones_report_peaks_dated_today() {
        let mut book = PlayerBook::new();
        let today = day("2025-06-01");
        let p = book
            .entry("Alice".to_string())
            .or_insert_with(|| PlayerRecord::new(1040.0, 1000.0, day("2025-05-01")));
        p.max_singles_elo = 1040.0;
        p.max_singles_date = today;

        let milestones = peak_milestones(&book, today);
        assert_eq!(milestones.len(), 1);
        assert_eq!(milestones[0].name, "Alice");
        assert_eq!(milestones[0].mode, Mode::Singles);
        assert_eq!(milestones[0].rating, 1040.0);
    }
}
