use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::StoreSettings;
use crate::domain::{MatchRecord, PlayerBook};

/// File-backed store for the two persisted documents: the player book and
/// the match ledger. Loads never fail: a missing or empty document starts
/// empty, and a corrupt one is treated as empty with a loud warning.
pub struct JsonStore {
    players_path: PathBuf,
    history_path: PathBuf,
}

impl JsonStore {
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            players_path: settings.players_path,
            history_path: settings.history_path,
        }
    }

    pub fn load_players(&self) -> PlayerBook {
        self.load_or_default(&self.players_path)
    }

    pub fn save_players(&self, players: &PlayerBook) -> Result<()> {
        self.write_document(&self.players_path, players)
    }

    pub fn load_history(&self) -> Vec<MatchRecord> {
        self.load_or_default(&self.history_path)
    }

    pub fn save_history(&self, history: &[MatchRecord]) -> Result<()> {
        self.write_document(&self.history_path, &history)
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, path: &Path) -> T {
        if !path.exists() {
            return T::default();
        }

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("could not read {}: {e}; starting empty", path.display());
                return T::default();
            }
        };
        if raw.trim().is_empty() {
            return T::default();
        }

        match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(e) => {
                // Favors availability over halting; the warning is the only
                // trace of potential silent data loss.
                warn!(
                    "treating corrupt document {} as empty: {e}",
                    path.display()
                );
                T::default()
            }
        }
    }

    /// Whole-document overwrite via a sibling temp file and atomic rename.
    fn write_document<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data).context("Failed to serialize document")?;

        let mut tmp_path = path.as_os_str().to_owned();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to swap {} into place", path.display()))?;

        info!("Saved document: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlayerRecord;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonStore {
        JsonStore::new(StoreSettings {
            players_path: dir.path().join("players.json"),
            history_path: dir.path().join("matches.json"),
        })
    }

    #[test]
    fn missing_documents_load_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load_players().is_empty());
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn empty_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(dir.path().join("players.json"), "  \n").unwrap();
        assert!(store.load_players().is_empty());
    }

    #[test]
    fn corrupt_document_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(dir.path().join("players.json"), "{not json").unwrap();
        fs::write(dir.path().join("matches.json"), "[1, 2, oops").unwrap();
        assert!(store.load_players().is_empty());
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn players_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let today = "2025-06-01".parse().unwrap();

        let mut book = PlayerBook::new();
        book.insert("Alice".to_string(), PlayerRecord::new(1050.0, 990.0, today));
        store.save_players(&book).unwrap();

        let loaded = store.load_players();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["Alice"].singles_elo, 1050.0);
        assert_eq!(loaded["Alice"].doubles_elo, 990.0);
        // No stray temp file left behind.
        assert!(!dir.path().join("players.json.tmp").exists());
    }

    #[test]
    fn counters_default_when_absent_from_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let json = r#"{
            "Alice": {
                "singles_elo": 1010.0,
                "doubles_elo": 1000.0,
                "last_match_date": "2025-06-01",
                "max_singles_elo": 1010.0,
                "max_singles_date": "2025-06-01",
                "max_doubles_elo": 1000.0,
                "max_doubles_date": "2025-06-01"
            }
        }"#;
        fs::write(dir.path().join("players.json"), json).unwrap();

        let book = store.load_players();
        assert_eq!(book["Alice"].counters.singles.matches_played, 0);
        assert_eq!(book["Alice"].counters.doubles.best_win_streak, 0);
    }
}
