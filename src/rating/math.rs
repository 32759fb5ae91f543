use crate::config::RatingSettings;
use crate::domain::SetKind;

/// Expected win probability of `rating_a` against `rating_b` (logistic Elo).
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// Convert a set or tiebreak score to game-equivalents per side.
/// Tiebreak points are down-weighted so a breaker counts less than a set.
pub fn equivalent_games(kind: SetKind, a: u32, b: u32, cfg: &RatingSettings) -> (f64, f64) {
    match kind {
        SetKind::Tiebreak => (
            a as f64 / cfg.points_per_game_tiebreak,
            b as f64 / cfg.points_per_game_tiebreak,
        ),
        SetKind::Set => (a as f64, b as f64),
    }
}

/// Margin-of-victory multiplier for the per-set K.
/// 1.0 at an even split, up to `1 + alpha_mov` at a shutout. Shared by both
/// sides, so the update stays zero-sum.
pub fn mov_multiplier(actual_share: f64, cfg: &RatingSettings) -> f64 {
    let s = actual_share.clamp(0.0, 1.0);
    1.0 + cfg.alpha_mov * (2.0 * s - 1.0).abs()
}

/// Fraction of a full set's K a standalone tiebreak is worth, scaled by its
/// length in game-equivalents and clamped to the configured bounds.
pub fn tiebreak_fraction(equivalent_total: f64, cfg: &RatingSettings) -> f64 {
    (equivalent_total / cfg.avg_games_per_set).clamp(cfg.tb_min_fraction, cfg.tb_max_fraction)
}

/// Standard Elo update: move the rating by K times the surprise.
pub fn update_rating(rating: f64, expected: f64, actual: f64, k: f64) -> f64 {
    rating + k * (actual - expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> RatingSettings {
        RatingSettings::default()
    }

    #[test]
    fn expectation_is_symmetric() {
        for (ra, rb) in [(1000.0, 1000.0), (1200.0, 950.0), (800.0, 1600.0)] {
            let sum = expected_score(ra, rb) + expected_score(rb, ra);
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn expectation_favors_higher_rating() {
        assert!(expected_score(1200.0, 1000.0) > 0.5);
        assert!(expected_score(1000.0, 1200.0) < 0.5);
        assert!((expected_score(1000.0, 1000.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn mov_multiplier_bounds_and_endpoints() {
        let cfg = cfg();
        for i in 0..=100 {
            let s = i as f64 / 100.0;
            let m = mov_multiplier(s, &cfg);
            assert!((1.0..=1.20).contains(&m), "m={m} at s={s}");
        }
        assert_eq!(mov_multiplier(0.5, &cfg), 1.0);
        assert!((mov_multiplier(0.0, &cfg) - 1.20).abs() < 1e-12);
        assert!((mov_multiplier(1.0, &cfg) - 1.20).abs() < 1e-12);
        // Out-of-range inputs are clamped.
        assert!((mov_multiplier(1.5, &cfg) - 1.20).abs() < 1e-12);
    }

    #[test]
    fn tiebreak_fraction_is_clamped() {
        let cfg = cfg();
        assert_eq!(tiebreak_fraction(0.0, &cfg), 0.30);
        assert_eq!(tiebreak_fraction(100.0, &cfg), 0.70);
        // 7-5 breaker: 12 points = 3 game-equivalents -> 0.30 floor.
        assert_eq!(tiebreak_fraction(3.0, &cfg), 0.30);
        // 18-16 breaker: 34 points = 8.5 game-equivalents -> 0.70 cap.
        assert_eq!(tiebreak_fraction(8.5, &cfg), 0.70);
        let mid = tiebreak_fraction(5.0, &cfg);
        assert!((mid - 0.5).abs() < 1e-12);
    }

    #[test]
    fn equivalent_games_scales_only_tiebreaks() {
        let cfg = cfg();
        assert_eq!(equivalent_games(SetKind::Set, 6, 3, &cfg), (6.0, 3.0));
        assert_eq!(equivalent_games(SetKind::Tiebreak, 10, 8, &cfg), (2.5, 2.0));
    }

    #[test]
    fn rating_update_is_zero_sum_under_shared_k() {
        let (ra, rb) = (1030.0, 980.0);
        let exp_a = expected_score(ra, rb);
        let k = 100.0;
        let na = update_rating(ra, exp_a, 0.75, k);
        let nb = update_rating(rb, 1.0 - exp_a, 0.25, k);
        assert!(((na - ra) + (nb - rb)).abs() < 1e-9);
    }
}
