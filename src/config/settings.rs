use std::path::PathBuf;

use crate::domain::DEFAULT_RATING;

/// Knobs of the rating engine. Defaults are the camp's tuned values.
pub struct RatingSettings {
    /// Starting Elo for new players (both modes).
    pub default_rating: f64,
    /// K-factor for each set, before MOV and tiebreak scaling.
    pub k_base: f64,
    /// Match-completion bonus pool for singles.
    pub k_match_singles: f64,
    /// Match-completion bonus pool for doubles (split across the team).
    pub k_match_doubles: f64,
    /// Tiebreak points treated as one game-equivalent.
    pub points_per_game_tiebreak: f64,
    /// Margin-of-victory boost at a shutout (+20% by default).
    pub alpha_mov: f64,
    /// Typical games in a full set, used to scale tiebreak weight.
    pub avg_games_per_set: f64,
    /// Shortest tiebreak still counts this fraction of a set.
    pub tb_min_fraction: f64,
    /// Marathon tiebreaks are capped at this fraction of a set.
    pub tb_max_fraction: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            default_rating: DEFAULT_RATING,
            k_base: 100.0,
            k_match_singles: 15.0,
            k_match_doubles: 15.0,
            points_per_game_tiebreak: 4.0,
            alpha_mov: 0.20,
            avg_games_per_set: 10.0,
            tb_min_fraction: 0.30,
            tb_max_fraction: 0.70,
        }
    }
}

/// Where the two persisted documents live.
pub struct StoreSettings {
    pub players_path: PathBuf,
    pub history_path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            players_path: PathBuf::from("players.json"),
            history_path: PathBuf::from("matches.json"),
        }
    }
}

pub struct AppConfig {
    pub rating: RatingSettings,
    pub store: StoreSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            store: StoreSettings::default(),
        }
    }
}

// Passed explicitly into services rather than held as a global.
