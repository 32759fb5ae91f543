use std::collections::BTreeMap;

use anyhow::Result;
use chrono::Local;
use log::info;

use crate::config::{AppConfig, RatingSettings};
use crate::domain::{MatchRecord, Mode, Participants, PlayerBook, Side};
use crate::rating::{SeriesOutcome, play_doubles_series, play_singles_series};
use crate::store::JsonStore;

use super::presenter::names_label;

/// Records series: runs the rating engine, then persists exactly one new
/// ledger entry plus the mutated player book. Nothing is saved if the
/// series fails to parse.
pub struct RecordingService {
    store: JsonStore,
    rating: RatingSettings,
}

impl RecordingService {
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: JsonStore::new(config.store),
            rating: config.rating,
        }
    }

    pub fn record_singles(&self, name_a: &str, name_b: &str, tokens: &[String]) -> Result<()> {
        let mut players = self.store.load_players();
        let now = Local::now();
        let today = now.date_naive();

        let names = [name_a.to_string(), name_b.to_string()];
        let before = rating_snapshot(&players, &names, Mode::Singles, self.rating.default_rating);

        let outcome =
            play_singles_series(&mut players, name_a, name_b, tokens, &self.rating, today)?;

        let after = rating_snapshot(&players, &names, Mode::Singles, self.rating.default_rating);
        let record = build_record(
            now.to_rfc3339(),
            today,
            Participants::Singles { players: names },
            &outcome,
            before,
            after,
        );
        self.persist(players, record)?;

        announce(
            &format!("{name_a} vs {name_b}"),
            outcome.sets.len(),
            outcome.winner,
            "singles",
        );
        Ok(())
    }

    pub fn record_doubles(
        &self,
        team_a: &[String; 2],
        team_b: &[String; 2],
        tokens: &[String],
    ) -> Result<()> {
        let mut players = self.store.load_players();
        let now = Local::now();
        let today = now.date_naive();

        let names: Vec<String> = team_a.iter().chain(team_b).cloned().collect();
        let before = rating_snapshot(&players, &names, Mode::Doubles, self.rating.default_rating);

        let outcome = play_doubles_series(&mut players, team_a, team_b, tokens, &self.rating, today)?;

        let after = rating_snapshot(&players, &names, Mode::Doubles, self.rating.default_rating);
        let record = build_record(
            now.to_rfc3339(),
            today,
            Participants::Doubles {
                teams: [team_a.clone(), team_b.clone()],
            },
            &outcome,
            before,
            after,
        );
        self.persist(players, record)?;

        announce(
            &format!("{} vs {}", names_label(team_a), names_label(team_b)),
            outcome.sets.len(),
            outcome.winner,
            "doubles",
        );
        Ok(())
    }

    fn persist(&self, players: PlayerBook, record: MatchRecord) -> Result<()> {
        let mut history = self.store.load_history();
        history.push(record);
        self.store.save_history(&history)?;
        self.store.save_players(&players)?;
        info!("Ledger now holds {} entries", history.len());
        Ok(())
    }
}

fn rating_snapshot<S: AsRef<str>>(
    players: &PlayerBook,
    names: &[S],
    mode: Mode,
    default_rating: f64,
) -> BTreeMap<String, f64> {
    names
        .iter()
        .map(|n| {
            let name = n.as_ref();
            let rating = players.get(name).map_or(default_rating, |p| p.rating(mode));
            (name.to_string(), rating)
        })
        .collect()
}

fn build_record(
    timestamp: String,
    date: chrono::NaiveDate,
    participants: Participants,
    outcome: &SeriesOutcome,
    before: BTreeMap<String, f64>,
    after: BTreeMap<String, f64>,
) -> MatchRecord {
    let change = after
        .iter()
        .map(|(name, post)| {
            let pre = before.get(name).copied().unwrap_or(*post);
            (name.clone(), post - pre)
        })
        .collect();

    MatchRecord {
        timestamp,
        date,
        participants,
        sets: outcome.sets.clone(),
        winner: outcome.winner,
        decided_by_tiebreak: outcome.decided_by_tiebreak,
        comeback_win: outcome.comeback_win,
        elos_before: before,
        elos_after: after,
        elo_change: change,
    }
}

fn announce(label: &str, set_count: usize, winner: Option<Side>, kind: &str) {
    match winner {
        Some(side) => {
            println!("Recorded {kind} series for {label} ({set_count} sets), winner {side}.")
        }
        None => println!(
            "Recorded {kind} series for {label} ({set_count} sets) - tie. No match bonus applied."
        ),
    }
}
