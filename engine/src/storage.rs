use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::game::state::SerializedState;
use crate::log;

/// Where a session persists itself between processes. The game never
/// depends on a store working: `load` may always come back empty and
/// writes may silently do nothing, in which case play continues as a
/// fresh session.
pub trait StateStore {
    fn load(&self) -> Option<SerializedState>;
    fn save(&mut self, state: &SerializedState);
    fn clear(&mut self);
    fn best_score(&self) -> u32;
    fn set_best_score(&mut self, score: u32);
}

/// In-process store. Doubles as the fallback when no persistent
/// backend is wanted.
#[derive(Default)]
pub struct MemoryStore {
    state: Option<SerializedState>,
    best_score: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Option<SerializedState> {
        self.state.clone()
    }

    fn save(&mut self, state: &SerializedState) {
        self.state = Some(state.clone());
    }

    fn clear(&mut self) {
        self.state = None;
    }

    fn best_score(&self) -> u32 {
        self.best_score
    }

    fn set_best_score(&mut self, score: u32) {
        self.best_score = score;
    }
}

#[derive(Debug)]
pub enum StorageError {
    IoError(std::io::Error),
    FormatError(serde_yaml_ng::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
            StorageError::FormatError(e) => write!(f, "Format error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::IoError(e)
    }
}

impl From<serde_yaml_ng::Error> for StorageError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        StorageError::FormatError(e)
    }
}

#[derive(Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u32,
}

const STATE_FILE: &str = "state.yaml";
const BEST_SCORE_FILE: &str = "best_score.yaml";

/// YAML files in a data directory. Failures are logged and degrade to
/// the no-op behavior the `StateStore` contract allows.
pub struct YamlFileStore {
    dir: PathBuf,
}

impl YamlFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    fn best_score_path(&self) -> PathBuf {
        self.dir.join(BEST_SCORE_FILE)
    }

    fn read_yaml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, StorageError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    fn write_yaml<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let content = serde_yaml_ng::to_string(value)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl StateStore for YamlFileStore {
    fn load(&self) -> Option<SerializedState> {
        let path = self.state_path();
        if !path.exists() {
            return None;
        }
        match Self::read_yaml(&path) {
            Ok(state) => Some(state),
            Err(e) => {
                log!("Ignoring unreadable saved state {}: {}", path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, state: &SerializedState) {
        if let Err(e) = self.write_yaml(&self.state_path(), state) {
            log!("Failed to save game state: {}", e);
        }
    }

    fn clear(&mut self) {
        let path = self.state_path();
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                log!("Failed to clear saved state {}: {}", path.display(), e);
            }
        }
    }

    fn best_score(&self) -> u32 {
        let path = self.best_score_path();
        if !path.exists() {
            return 0;
        }
        match Self::read_yaml::<BestScoreRecord>(&path) {
            Ok(record) => record.best_score,
            Err(e) => {
                log!("Ignoring unreadable best score {}: {}", path.display(), e);
                0
            }
        }
    }

    fn set_best_score(&mut self, score: u32) {
        let record = BestScoreRecord { best_score: score };
        if let Err(e) = self.write_yaml(&self.best_score_path(), &record) {
            log!("Failed to save best score: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::{Grid, SerializedGrid};
    use crate::game::types::Position;

    fn sample_state() -> SerializedState {
        let mut grid = Grid::empty(4);
        grid.spawn_tile(Position::new(0, 0), 2);
        grid.spawn_tile(Position::new(1, 0), 4);
        SerializedState {
            grid: grid.serialize(),
            score: 12,
            over: false,
            won: false,
            keep_playing: false,
        }
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().is_none());

        let state = sample_state();
        store.save(&state);
        assert_eq!(store.load(), Some(state));

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_memory_store_best_score() {
        let mut store = MemoryStore::new();
        assert_eq!(store.best_score(), 0);
        store.set_best_score(128);
        assert_eq!(store.best_score(), 128);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("game2048_store_{}", std::process::id()));
        let mut store = YamlFileStore::new(&dir);

        assert!(store.load().is_none());
        let state = sample_state();
        store.save(&state);
        assert_eq!(store.load(), Some(state));

        store.set_best_score(512);
        assert_eq!(store.best_score(), 512);

        store.clear();
        assert!(store.load().is_none());
        // best score survives a state clear
        assert_eq!(store.best_score(), 512);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_missing_dir_is_empty() {
        let store = YamlFileStore::new("/nonexistent/game2048-test");
        assert!(store.load().is_none());
        assert_eq!(store.best_score(), 0);
    }

    #[test]
    fn test_serialized_state_yaml_round_trip() {
        let state = sample_state();
        let yaml = serde_yaml_ng::to_string(&state).unwrap();
        let restored: SerializedState = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(restored, state);

        let grid = SerializedGrid {
            size: restored.grid.size,
            cells: restored.grid.cells.clone(),
        };
        let rebuilt = Grid::from_serialized(&grid);
        assert_eq!(rebuilt.serialize(), state.grid);
    }
}
