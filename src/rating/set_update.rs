use chrono::NaiveDate;

use super::math;
use crate::config::RatingSettings;
use crate::domain::{
    DEFAULT_RATING, Mode, PlayerBook, PlayerRecord, SetKind, SetResult, Side, ensure_player,
};

/// Per-set scalars shared by both sides, computed from side A's view and
/// from pre-update ratings only.
struct Exchange {
    expected_a: f64,
    actual_a: f64,
    k_eff: f64,
}

fn exchange_for(rating_a: f64, rating_b: f64, set: &SetResult, cfg: &RatingSettings) -> Exchange {
    let expected_a = math::expected_score(rating_a, rating_b);
    let (a_eq, b_eq) = math::equivalent_games(set.kind, set.games_a(), set.games_b(), cfg);
    let total = a_eq + b_eq;
    // 0-0 tokens degenerate to an even split.
    let actual_a = if total > 0.0 { a_eq / total } else { 0.5 };

    let mut k_eff = cfg.k_base * math::mov_multiplier(actual_a, cfg);
    if set.kind == SetKind::Tiebreak {
        k_eff *= math::tiebreak_fraction(total, cfg);
    }

    Exchange {
        expected_a,
        actual_a,
        k_eff,
    }
}

/// Apply one set's rating delta and counter increments to one participant.
fn settle(
    player: &mut PlayerRecord,
    mode: Mode,
    set: &SetResult,
    side: Side,
    exchange: &Exchange,
    today: NaiveDate,
) {
    let (expected, actual) = match side {
        Side::A => (exchange.expected_a, exchange.actual_a),
        Side::B => (1.0 - exchange.expected_a, 1.0 - exchange.actual_a),
    };
    let rating = player.rating(mode);
    player.set_rating(mode, math::update_rating(rating, expected, actual, exchange.k_eff));

    let won = set.winner() == Some(side);
    let counters = player.counters.mode_mut(mode);
    counters.sets_played += 1;
    if won {
        counters.sets_won += 1;
    }
    if set.kind == SetKind::Tiebreak {
        counters.tiebreaks_played += 1;
        if won {
            counters.tiebreaks_won += 1;
        }
    }
    if set.is_bagel() {
        // A bagel always has a winner, so `won` picks the direction.
        if won {
            counters.bagels_given += 1;
        } else {
            counters.bagels_taken += 1;
        }
    }

    player.last_match_date = today;
    player.note_peak(mode, today);
}

/// Apply one singles set/tiebreak to both players' rating and counters.
pub fn apply_singles_set(
    book: &mut PlayerBook,
    name_a: &str,
    name_b: &str,
    set: &SetResult,
    cfg: &RatingSettings,
    today: NaiveDate,
) {
    let rating_a = ensure_player(book, name_a, today).singles_elo;
    let rating_b = ensure_player(book, name_b, today).singles_elo;
    let exchange = exchange_for(rating_a, rating_b, set, cfg);

    for (name, side) in [(name_a, Side::A), (name_b, Side::B)] {
        let player = ensure_player(book, name, today);
        settle(player, Mode::Singles, set, side, &exchange, today);
    }
}

/// Apply one doubles set/tiebreak to all four players. Expectation uses the
/// team-average ratings; both members of a team receive the same delta.
pub fn apply_doubles_set(
    book: &mut PlayerBook,
    team_a: &[String; 2],
    team_b: &[String; 2],
    set: &SetResult,
    cfg: &RatingSettings,
    today: NaiveDate,
) {
    for name in team_a.iter().chain(team_b) {
        ensure_player(book, name, today);
    }
    let exchange = exchange_for(team_rating(book, team_a), team_rating(book, team_b), set, cfg);

    for (team, side) in [(team_a, Side::A), (team_b, Side::B)] {
        for name in team {
            let player = ensure_player(book, name, today);
            settle(player, Mode::Doubles, set, side, &exchange, today);
        }
    }
}

/// Mean doubles rating of a team's members.
pub(crate) fn team_rating(book: &PlayerBook, team: &[String; 2]) -> f64 {
    let total: f64 = team
        .iter()
        .map(|n| book.get(n).map_or(DEFAULT_RATING, |p| p.doubles_elo))
        .sum();
    total / 2.0
}
