use chrono::NaiveDate;

use crate::domain::{MatchRecord, Mode, SetResult};

/// Windowing for momentum queries. `Since` and `LastN` are mutually
/// exclusive at the CLI; `None` at call sites means "last 5 matches".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Since(NaiveDate),
    LastN(usize),
}

/// Matches considered when no explicit window is given.
pub const DEFAULT_WINDOW_MATCHES: usize = 5;

/// One player's summed Elo delta over some window of ledger entries.
#[derive(Debug, Clone, PartialEq)]
pub struct MoverRow {
    pub name: String,
    pub delta: f64,
}

/// Record between two players, restricted to entries containing both.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadToHead<'a> {
    pub matches: u32,
    pub wins: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    /// Most recent shared entry, newest first.
    pub last: Option<&'a MatchRecord>,
}

/// A flagged upset: the winner was a clear pre-match underdog.
#[derive(Debug, Clone, PartialEq)]
pub struct Upset {
    pub mode: Mode,
    pub winners: Vec<String>,
    pub losers: Vec<String>,
    /// Winner's pre-match expectation.
    pub expectation: f64,
    /// Winner side's summed Elo delta.
    pub delta: f64,
    pub sets: Vec<SetResult>,
}

/// Simple counts for one day's ledger entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyStats {
    pub singles_matches: u32,
    pub doubles_matches: u32,
    pub sets_total: u32,
    pub tiebreaks: u32,
    pub bagels: u32,
    pub participants: usize,
}

/// A peak rating reached on the report date.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakMilestone {
    pub name: String,
    pub mode: Mode,
    pub rating: f64,
}
