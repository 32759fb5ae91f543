use chrono::NaiveDate;

use super::math;
use super::score::parse_set_token;
use super::set_update::{apply_doubles_set, apply_singles_set, team_rating};
use crate::config::RatingSettings;
use crate::domain::{
    Mode, PlayerBook, PlayerRecord, SetKind, SetResult, Side, ensure_player, first_set_winner,
};
use crate::errors::EloCampError;

/// What a completed series produced, for the caller to log.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesOutcome {
    pub sets: Vec<SetResult>,
    pub winner: Option<Side>,
    pub decided_by_tiebreak: bool,
    pub comeback_win: bool,
}

/// Record a full singles series: every set in order, then the match bonus
/// from the pre-series expectation, then match/streak bookkeeping.
///
/// All tokens are parsed up front, so a bad token fails the series before
/// any rating is touched.
pub fn play_singles_series(
    book: &mut PlayerBook,
    name_a: &str,
    name_b: &str,
    tokens: &[String],
    cfg: &RatingSettings,
    today: NaiveDate,
) -> Result<SeriesOutcome, EloCampError> {
    let sets = parse_all(tokens)?;

    let rating_a0 = ensure_player(book, name_a, today).singles_elo;
    let rating_b0 = ensure_player(book, name_b, today).singles_elo;

    for set in &sets {
        apply_singles_set(book, name_a, name_b, set, cfg, today);
    }
    let winner = series_winner(&sets);

    if let Some(w) = winner {
        // Bonus expectation comes from the starting snapshot, not the
        // post-set ratings.
        let expected_a = math::expected_score(rating_a0, rating_b0);
        let bonus = match w {
            Side::A => cfg.k_match_singles * (1.0 - expected_a),
            Side::B => cfg.k_match_singles * expected_a,
        };
        let signed = |side: Side| if w == side { bonus } else { -bonus };
        ensure_player(book, name_a, today).singles_elo += signed(Side::A);
        ensure_player(book, name_b, today).singles_elo += signed(Side::B);
    }

    for (name, side) in [(name_a, Side::A), (name_b, Side::B)] {
        let won = winner.map(|w| w == side);
        close_out_series(ensure_player(book, name, today), Mode::Singles, won, today);
    }

    Ok(outcome(sets, winner))
}

/// Doubles counterpart of [`play_singles_series`]. Team expectation uses the
/// mean of the pre-series member ratings; the team bonus is split evenly.
pub fn play_doubles_series(
    book: &mut PlayerBook,
    team_a: &[String; 2],
    team_b: &[String; 2],
    tokens: &[String],
    cfg: &RatingSettings,
    today: NaiveDate,
) -> Result<SeriesOutcome, EloCampError> {
    let sets = parse_all(tokens)?;

    for name in team_a.iter().chain(team_b) {
        ensure_player(book, name, today);
    }
    let rating_a0 = team_rating(book, team_a);
    let rating_b0 = team_rating(book, team_b);

    for set in &sets {
        apply_doubles_set(book, team_a, team_b, set, cfg, today);
    }
    let winner = series_winner(&sets);

    if let Some(w) = winner {
        let expected_a = math::expected_score(rating_a0, rating_b0);
        let team_bonus = match w {
            Side::A => cfg.k_match_doubles * (1.0 - expected_a),
            Side::B => cfg.k_match_doubles * expected_a,
        };
        let split = team_bonus / 2.0;
        let signed = |side: Side| if w == side { split } else { -split };
        for name in team_a {
            ensure_player(book, name, today).doubles_elo += signed(Side::A);
        }
        for name in team_b {
            ensure_player(book, name, today).doubles_elo += signed(Side::B);
        }
    }

    for (team, side) in [(team_a, Side::A), (team_b, Side::B)] {
        let won = winner.map(|w| w == side);
        for name in team {
            close_out_series(ensure_player(book, name, today), Mode::Doubles, won, today);
        }
    }

    Ok(outcome(sets, winner))
}

fn parse_all(tokens: &[String]) -> Result<Vec<SetResult>, EloCampError> {
    tokens.iter().map(|t| parse_set_token(t)).collect()
}

/// Side with strictly more set wins; `None` on an even tally.
fn series_winner(sets: &[SetResult]) -> Option<Side> {
    let wins_a = sets.iter().filter(|s| s.winner() == Some(Side::A)).count();
    let wins_b = sets.iter().filter(|s| s.winner() == Some(Side::B)).count();
    match wins_a.cmp(&wins_b) {
        std::cmp::Ordering::Greater => Some(Side::A),
        std::cmp::Ordering::Less => Some(Side::B),
        std::cmp::Ordering::Equal => None,
    }
}

/// Match counters, streaks, date stamp, and a final peak check (the bonus
/// can itself set a new peak). Ties leave streaks untouched.
fn close_out_series(player: &mut PlayerRecord, mode: Mode, won: Option<bool>, today: NaiveDate) {
    let counters = player.counters.mode_mut(mode);
    counters.matches_played += 1;
    match won {
        Some(true) => {
            counters.matches_won += 1;
            counters.current_win_streak += 1;
            counters.best_win_streak = counters.best_win_streak.max(counters.current_win_streak);
        }
        Some(false) => counters.current_win_streak = 0,
        None => {}
    }
    player.last_match_date = today;
    player.note_peak(mode, today);
}

fn outcome(sets: Vec<SetResult>, winner: Option<Side>) -> SeriesOutcome {
    let decided_by_tiebreak = sets.last().is_some_and(|s| s.kind == SetKind::Tiebreak);
    let comeback_win = match (winner, first_set_winner(&sets)) {
        (Some(w), Some(first)) => w != first,
        _ => false,
    };
    SeriesOutcome {
        sets,
        winner,
        decided_by_tiebreak,
        comeback_win,
    }
}
