use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rating every player starts from in both modes.
pub const DEFAULT_RATING: f64 = 1000.0;

/// Discipline a rating or match belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lowercase")]
pub enum Mode {
    Singles,
    Doubles,
}

impl Mode {
    pub fn title(&self) -> &'static str {
        match self {
            Mode::Singles => "Singles",
            Mode::Doubles => "Doubles",
        }
    }
}

/// Whether a logged score was a full set or a standalone tiebreak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SetKind {
    #[default]
    Set,
    Tiebreak,
}

/// Side tag for the two halves of a match (first-listed side is A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// One set or tiebreak result: games (or points) won by each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetResult {
    pub games: [u32; 2],
    #[serde(default)]
    pub kind: SetKind,
}

impl SetResult {
    pub fn new(a: u32, b: u32, kind: SetKind) -> Self {
        Self { games: [a, b], kind }
    }

    pub fn games_a(&self) -> u32 {
        self.games[0]
    }

    pub fn games_b(&self) -> u32 {
        self.games[1]
    }

    /// Side that took strictly more games, if any.
    pub fn winner(&self) -> Option<Side> {
        match self.games[0].cmp(&self.games[1]) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// A bagel is a full set won 6+ games to 0.
    pub fn is_bagel(&self) -> bool {
        if self.kind != SetKind::Set {
            return false;
        }
        let winner = self.games[0].max(self.games[1]);
        let loser = self.games[0].min(self.games[1]);
        loser == 0 && winner >= 6
    }
}

impl fmt::Display for SetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SetKind::Set => write!(f, "{}-{}", self.games[0], self.games[1]),
            SetKind::Tiebreak => write!(f, "{}-{}[tiebreak]", self.games[0], self.games[1]),
        }
    }
}

/// Side that won the first set of a series, if it had a winner.
pub fn first_set_winner(sets: &[SetResult]) -> Option<Side> {
    sets.first().and_then(SetResult::winner)
}

/// Per-mode lifetime counters for a player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeCounters {
    pub matches_played: u32,
    pub matches_won: u32,
    pub sets_played: u32,
    pub sets_won: u32,
    pub tiebreaks_played: u32,
    pub tiebreaks_won: u32,
    pub bagels_given: u32,
    pub bagels_taken: u32,
    pub current_win_streak: u32,
    pub best_win_streak: u32,
}

/// Counters for both modes, always fully materialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Counters {
    pub singles: ModeCounters,
    pub doubles: ModeCounters,
}

impl Counters {
    pub fn mode(&self, mode: Mode) -> &ModeCounters {
        match mode {
            Mode::Singles => &self.singles,
            Mode::Doubles => &self.doubles,
        }
    }

    pub fn mode_mut(&mut self, mode: Mode) -> &mut ModeCounters {
        match mode {
            Mode::Singles => &mut self.singles,
            Mode::Doubles => &mut self.doubles,
        }
    }
}

/// A player's persisted state: current ratings, peaks, and counters.
///
/// The constructor populates every field, so loaded records never need
/// field-presence checks (counters still default for older documents).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub singles_elo: f64,
    pub doubles_elo: f64,
    pub last_match_date: NaiveDate,
    pub max_singles_elo: f64,
    pub max_singles_date: NaiveDate,
    pub max_doubles_elo: f64,
    pub max_doubles_date: NaiveDate,
    #[serde(default)]
    pub counters: Counters,
}

impl PlayerRecord {
    pub fn new(singles_elo: f64, doubles_elo: f64, today: NaiveDate) -> Self {
        Self {
            singles_elo,
            doubles_elo,
            last_match_date: today,
            max_singles_elo: singles_elo,
            max_singles_date: today,
            max_doubles_elo: doubles_elo,
            max_doubles_date: today,
            counters: Counters::default(),
        }
    }

    pub fn rating(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Singles => self.singles_elo,
            Mode::Doubles => self.doubles_elo,
        }
    }

    pub fn set_rating(&mut self, mode: Mode, rating: f64) {
        match mode {
            Mode::Singles => self.singles_elo = rating,
            Mode::Doubles => self.doubles_elo = rating,
        }
    }

    pub fn peak(&self, mode: Mode) -> (f64, NaiveDate) {
        match mode {
            Mode::Singles => (self.max_singles_elo, self.max_singles_date),
            Mode::Doubles => (self.max_doubles_elo, self.max_doubles_date),
        }
    }

    /// Record a new peak if the current rating strictly exceeds the stored one.
    pub fn note_peak(&mut self, mode: Mode, today: NaiveDate) {
        match mode {
            Mode::Singles => {
                if self.singles_elo > self.max_singles_elo {
                    self.max_singles_elo = self.singles_elo;
                    self.max_singles_date = today;
                }
            }
            Mode::Doubles => {
                if self.doubles_elo > self.max_doubles_elo {
                    self.max_doubles_elo = self.doubles_elo;
                    self.max_doubles_date = today;
                }
            }
        }
    }
}

/// All players, keyed by name. BTreeMap keeps iteration order stable
/// across runs, which the leaderboard tie-break relies on.
pub type PlayerBook = BTreeMap<String, PlayerRecord>;

/// Look up a player, creating a default-rated record on first reference.
pub fn ensure_player<'a>(
    book: &'a mut PlayerBook,
    name: &str,
    today: NaiveDate,
) -> &'a mut PlayerRecord {
    book.entry(name.to_string())
        .or_insert_with(|| PlayerRecord::new(DEFAULT_RATING, DEFAULT_RATING, today))
}

/// Outcome of a match from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win,
    Loss,
    Tie,
}

impl MatchOutcome {
    pub fn letter(&self) -> &'static str {
        match self {
            MatchOutcome::Win => "W",
            MatchOutcome::Loss => "L",
            MatchOutcome::Tie => "T",
        }
    }
}

/// Who played: two singles players, or two teams of two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Participants {
    #[serde(rename = "singles_series")]
    Singles { players: [String; 2] },
    #[serde(rename = "doubles_series")]
    Doubles { teams: [[String; 2]; 2] },
}

impl Participants {
    pub fn mode(&self) -> Mode {
        match self {
            Participants::Singles { .. } => Mode::Singles,
            Participants::Doubles { .. } => Mode::Doubles,
        }
    }

    /// Names on the given side, in listed order.
    pub fn side_names(&self, side: Side) -> &[String] {
        match (self, side) {
            (Participants::Singles { players }, Side::A) => std::slice::from_ref(&players[0]),
            (Participants::Singles { players }, Side::B) => std::slice::from_ref(&players[1]),
            (Participants::Doubles { teams }, Side::A) => &teams[0],
            (Participants::Doubles { teams }, Side::B) => &teams[1],
        }
    }

    pub fn side_of(&self, name: &str) -> Option<Side> {
        if self.side_names(Side::A).iter().any(|n| n == name) {
            Some(Side::A)
        } else if self.side_names(Side::B).iter().any(|n| n == name) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn all_names(&self) -> impl Iterator<Item = &String> {
        self.side_names(Side::A)
            .iter()
            .chain(self.side_names(Side::B))
    }
}

/// One append-only ledger entry: a full recorded series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub timestamp: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub participants: Participants,
    pub sets: Vec<SetResult>,
    pub winner: Option<Side>,
    pub decided_by_tiebreak: bool,
    pub comeback_win: bool,
    pub elos_before: BTreeMap<String, f64>,
    pub elos_after: BTreeMap<String, f64>,
    pub elo_change: BTreeMap<String, f64>,
}

impl MatchRecord {
    pub fn mode(&self) -> Mode {
        self.participants.mode()
    }

    pub fn involves(&self, name: &str) -> bool {
        self.participants.side_of(name).is_some()
    }

    pub fn result_for(&self, name: &str) -> MatchOutcome {
        match (self.winner, self.participants.side_of(name)) {
            (Some(w), Some(side)) if w == side => MatchOutcome::Win,
            (Some(_), Some(_)) => MatchOutcome::Loss,
            _ => MatchOutcome::Tie,
        }
    }

    /// Elo delta for one player, counted only in the entry's own mode.
    pub fn delta_for(&self, name: &str, mode: Mode) -> f64 {
        if self.mode() != mode {
            return 0.0;
        }
        self.elo_change.get(name).copied().unwrap_or(0.0)
    }

    /// Summed delta for every name on a side (team delta for doubles).
    pub fn side_delta(&self, side: Side) -> f64 {
        self.participants
            .side_names(side)
            .iter()
            .filter_map(|n| self.elo_change.get(n))
            .sum()
    }

    /// Mean pre-match rating of a side, with a fallback for missing names.
    pub fn side_rating_before(&self, side: Side) -> f64 {
        let names = self.participants.side_names(side);
        let total: f64 = names
            .iter()
            .map(|n| self.elos_before.get(n).copied().unwrap_or(DEFAULT_RATING))
            .sum();
        total / names.len() as f64
    }
}
