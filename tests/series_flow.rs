use std::fs;

use tempfile::TempDir;

use elo_camp::config::{AppConfig, RatingSettings, StoreSettings};
use elo_camp::domain::{DEFAULT_RATING, Mode, Side};
use elo_camp::services::RecordingService;
use elo_camp::stats;
use elo_camp::store::JsonStore;

fn config_in(dir: &TempDir) -> AppConfig {
    AppConfig {
        rating: RatingSettings::default(),
        store: StoreSettings {
            players_path: dir.path().join("players.json"),
            history_path: dir.path().join("matches.json"),
        },
    }
}

fn store_in(dir: &TempDir) -> JsonStore {
    JsonStore::new(StoreSettings {
        players_path: dir.path().join("players.json"),
        history_path: dir.path().join("matches.json"),
    })
}

#[test]
fn singles_series_persists_players_and_one_ledger_entry() {
    let dir = TempDir::new().unwrap();
    let service = RecordingService::new(config_in(&dir));

    let sets: Vec<String> = ["6-3", "4-6", "10-8[tiebreak]"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    service.record_singles("Alice", "Bob", &sets).unwrap();

    let store = store_in(&dir);
    let players = store.load_players();
    let history = store.load_history();

    assert_eq!(players.len(), 2);
    assert!(players["Alice"].singles_elo > DEFAULT_RATING);
    assert!(players["Bob"].singles_elo < DEFAULT_RATING);
    // Doubles ratings stay at the starting value.
    assert_eq!(players["Alice"].doubles_elo, DEFAULT_RATING);

    assert_eq!(history.len(), 1);
    let entry = &history[0];
    assert_eq!(entry.mode(), Mode::Singles);
    assert_eq!(entry.sets.len(), 3);
    assert_eq!(entry.winner, Some(Side::A));
    assert!(entry.decided_by_tiebreak);
    assert!(!entry.comeback_win);

    // Snapshots agree with the stored ratings.
    assert_eq!(entry.elos_before["Alice"], DEFAULT_RATING);
    assert_eq!(entry.elos_after["Alice"], players["Alice"].singles_elo);
    let delta_a = entry.elo_change["Alice"];
    let delta_b = entry.elo_change["Bob"];
    assert!((delta_a + delta_b).abs() < 1e-9);
    assert!(delta_a > 0.0);
}

#[test]
fn ledger_grows_and_streaks_accumulate_across_runs() {
    let dir = TempDir::new().unwrap();
    let service = RecordingService::new(config_in(&dir));

    for _ in 0..2 {
        service
            .record_singles("Alice", "Bob", &["6-2".to_string()])
            .unwrap();
    }

    let store = store_in(&dir);
    let players = store.load_players();
    let history = store.load_history();

    assert_eq!(history.len(), 2);
    assert_eq!(players["Alice"].counters.singles.current_win_streak, 2);
    assert_eq!(players["Alice"].counters.singles.matches_played, 2);
    assert_eq!(players["Bob"].counters.singles.matches_won, 0);

    let rows = stats::leaderboard(&players, Mode::Singles, 10);
    assert_eq!(rows[0].0, "Alice");
}

#[test]
fn doubles_series_records_teams_and_moves_partners_together() {
    let dir = TempDir::new().unwrap();
    let service = RecordingService::new(config_in(&dir));

    let team_a = ["Ada".to_string(), "Bea".to_string()];
    let team_b = ["Cal".to_string(), "Dot".to_string()];
    service
        .record_doubles(&team_a, &team_b, &["6-4".to_string()])
        .unwrap();

    let store = store_in(&dir);
    let players = store.load_players();
    let history = store.load_history();

    assert_eq!(players.len(), 4);
    assert_eq!(players["Ada"].doubles_elo, players["Bea"].doubles_elo);
    assert_eq!(players["Cal"].doubles_elo, players["Dot"].doubles_elo);
    assert!(players["Ada"].doubles_elo > players["Cal"].doubles_elo);

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].mode(), Mode::Doubles);

    // The ledger entry keeps the Python-era wire shape for doubles.
    let raw = fs::read_to_string(dir.path().join("matches.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["type"], "doubles_series");
    assert_eq!(json[0]["teams"][0][0], "Ada");
    assert_eq!(json[0]["winner"], "A");
}

#[test]
fn invalid_set_token_leaves_both_documents_untouched() {
    let dir = TempDir::new().unwrap();
    let service = RecordingService::new(config_in(&dir));

    let err = service
        .record_singles("Alice", "Bob", &["6-3".to_string(), "oops".to_string()])
        .unwrap_err();
    assert!(err.to_string().contains("oops"));

    assert!(!dir.path().join("players.json").exists());
    assert!(!dir.path().join("matches.json").exists());
}
