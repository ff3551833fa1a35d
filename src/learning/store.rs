use super::state::StyleMemoryState;
use crate::error::LearningError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable home for [`StyleMemoryState`]. Overwritten wholesale on save.
pub trait StyleStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<StyleMemoryState>>;

    fn save(&self, state: &StyleMemoryState) -> Result<()>;

    /// Where the state lives, for log lines.
    fn location(&self) -> String;
}

/// Pretty-printed JSON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StyleStore for JsonFileStore {
    fn load(&self) -> Result<Option<StyleMemoryState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| {
            LearningError::Read(format!("{}: {e}", self.path.display()))
        })?;
        let state: StyleMemoryState = serde_json::from_str(&raw).map_err(|e| {
            LearningError::Corrupt(format!("{}: {e}", self.path.display()))
        })?;

        Ok(Some(state))
    }

    fn save(&self, state: &StyleMemoryState) -> Result<()> {
        let json = serde_json::to_string_pretty(state).context("failed serializing style state")?;
        write_atomic(&self.path, &json)
            .map_err(|e| LearningError::Write(format!("{e:#}")))?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating style dir: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)
        .with_context(|| format!("failed writing temp file: {}", temp_path.display()))?;

    if let Err(rename_error) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(rename_error)
            .with_context(|| format!("failed replacing style file: {}", path.display()));
    }

    Ok(())
}

/// Process-local store, used when nothing should touch disk.
#[derive(Debug, Default)]
pub struct MemoryStyleStore {
    state: Mutex<Option<StyleMemoryState>>,
}

impl MemoryStyleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: StyleMemoryState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    pub fn saved(&self) -> Option<StyleMemoryState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl StyleStore for MemoryStyleStore {
    fn load(&self) -> Result<Option<StyleMemoryState>> {
        Ok(self.saved())
    }

    fn save(&self, state: &StyleMemoryState) -> Result<()> {
        *self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(state.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_none() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("absent.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips_exactly() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("data").join("learning_data.json"));

        let mut state = StyleMemoryState::baseline();
        state.term_counts.increment("based", 3);
        state.recent_texts = vec!["one".into(), "two".into()];
        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap(), Some(state));
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_reports_corruption() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("learning_data.json");
        fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LearningError>(),
            Some(LearningError::Corrupt(_))
        ));
    }

    #[test]
    fn memory_store_keeps_last_save() {
        let store = MemoryStyleStore::new();
        assert!(store.load().unwrap().is_none());

        let state = StyleMemoryState::baseline();
        store.save(&state).unwrap();
        assert_eq!(store.saved(), Some(state));
    }
}
