use super::catalogue::count_catalogue_matches;
use super::state::StyleMemoryState;
use super::store::StyleStore;
use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard};

const CONTEXT_TOP_TERMS: usize = 10;

/// Rolling memory of community phrasing, persisted after every observation.
pub struct StyleMemory {
    state: Mutex<StyleMemoryState>,
    store: Box<dyn StyleStore>,
    recent_capacity: usize,
}

impl StyleMemory {
    /// Load from `store`, falling back to the baseline when the stored state
    /// is absent or unreadable. Never fails.
    pub fn load(store: Box<dyn StyleStore>, recent_capacity: usize) -> Self {
        let recent_capacity = recent_capacity.max(1);
        let mut state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::info!(store = %store.location(), "no style memory yet; starting from baseline");
                StyleMemoryState::baseline()
            }
            Err(error) => {
                tracing::warn!(
                    store = %store.location(),
                    "style memory unreadable, starting from baseline: {error:#}"
                );
                StyleMemoryState::baseline()
            }
        };
        state.normalize(recent_capacity);

        Self {
            state: Mutex::new(state),
            store,
            recent_capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StyleMemoryState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Learn from one comment body and persist the result.
    ///
    /// Persistence failures are logged; the in-memory update stands.
    pub fn observe(&self, text: &str) {
        let mut state = self.lock();

        state.recent_texts.push(text.to_string());
        state.trim_recent(self.recent_capacity);

        for (term, hits) in count_catalogue_matches(text) {
            state.term_counts.increment(term, hits);
        }

        if let Err(error) = self.store.save(&state) {
            tracing::warn!(store = %self.store.location(), "failed saving style memory: {error:#}");
        }
    }

    /// Prompt fragment describing popular slang and the latest phrasing.
    pub fn build_context(&self) -> String {
        let state = self.lock();

        let slang_list = state
            .term_counts
            .top(CONTEXT_TOP_TERMS)
            .into_iter()
            .map(|(term, _)| format!("\"{term}\""))
            .collect::<Vec<_>>()
            .join(", ");

        let mut context = format!("\nPopular slang right now: {slang_list}.");

        if let [.., second, latest] = state.recent_texts.as_slice() {
            let _ = write!(
                context,
                "\nRecent user comments to mimic tone from:\n1. {latest}\n2. {second}"
            );
        }

        context
    }

    pub fn top_terms(&self, n: usize) -> Vec<(String, u64)> {
        self.lock()
            .term_counts
            .top(n)
            .into_iter()
            .map(|(term, count)| (term.to_string(), count))
            .collect()
    }

    pub fn snapshot(&self) -> StyleMemoryState {
        self.lock().clone()
    }

    /// Drop everything learned and persist the baseline.
    pub fn reset(&self) -> anyhow::Result<()> {
        let mut state = self.lock();
        *state = StyleMemoryState::baseline();
        self.store.save(&state)
    }

    pub fn location(&self) -> String {
        self.store.location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::state::TermCounts;
    use crate::learning::store::{JsonFileStore, MemoryStyleStore};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct FailingStore;

    impl StyleStore for FailingStore {
        fn load(&self) -> anyhow::Result<Option<StyleMemoryState>> {
            anyhow::bail!("disk on fire")
        }

        fn save(&self, _state: &StyleMemoryState) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }

        fn location(&self) -> String {
            "failing".into()
        }
    }

    /// Shares saved state with the test after the memory takes ownership.
    struct SharedStore(Arc<MemoryStyleStore>);

    impl StyleStore for SharedStore {
        fn load(&self) -> anyhow::Result<Option<StyleMemoryState>> {
            self.0.load()
        }

        fn save(&self, state: &StyleMemoryState) -> anyhow::Result<()> {
            self.0.save(state)
        }

        fn location(&self) -> String {
            self.0.location()
        }
    }

    fn fresh() -> StyleMemory {
        StyleMemory::load(Box::new(MemoryStyleStore::new()), 50)
    }

    #[test]
    fn observe_counts_catalogue_slang() {
        let memory = fresh();
        memory.observe("bhai this is crazy fr");

        let state = memory.snapshot();
        assert!(state.term_counts.get("bhai").unwrap() >= 1);
        assert!(state.term_counts.get("fr").unwrap() >= 1);
        assert_eq!(state.term_counts.get("bhai"), Some(2));
        assert_eq!(state.term_counts.get("crazy"), None);
    }

    #[test]
    fn context_lists_quoted_terms() {
        let memory = fresh();
        memory.observe("bhai");
        assert!(memory.build_context().contains("\"bhai\""));
    }

    #[test]
    fn context_ranks_by_count_then_first_seen() {
        let memory = fresh();
        memory.observe("lol lol lol");
        memory.observe("based based");

        let context = memory.build_context();
        assert!(context.starts_with("\nPopular slang right now: \"lol\", \"based\", \"bhai\", \"yaar\""));
    }

    #[test]
    fn context_caps_at_ten_terms() {
        let context = fresh().build_context();
        assert_eq!(context.matches('"').count(), 20);
        assert!(context.contains("\"ded\""));
        assert!(!context.contains("\"scene\""));
    }

    #[test]
    fn context_omits_examples_until_two_recent() {
        let memory = fresh();
        memory.observe("only one so far");
        assert!(!memory.build_context().contains("mimic"));
    }

    #[test]
    fn context_shows_latest_two_newest_first() {
        let memory = fresh();
        memory.observe("oldest");
        memory.observe("older");
        memory.observe("newest");

        let context = memory.build_context();
        assert!(context.ends_with(
            "\nRecent user comments to mimic tone from:\n1. newest\n2. older"
        ));
        assert!(!context.contains("oldest"));
    }

    #[test]
    fn build_context_does_not_mutate() {
        let memory = fresh();
        memory.observe("lol");
        let before = memory.snapshot();
        let _ = memory.build_context();
        assert_eq!(memory.snapshot(), before);
    }

    #[test]
    fn recent_buffer_is_capped() {
        let memory = fresh();
        for i in 0..55 {
            memory.observe(&format!("comment {i}"));
        }
        let state = memory.snapshot();
        assert_eq!(state.recent_texts.len(), 50);
        assert_eq!(state.recent_texts[0], "comment 5");
    }

    #[test]
    fn every_observation_is_persisted() {
        let shared = Arc::new(MemoryStyleStore::new());
        let memory = StyleMemory::load(Box::new(SharedStore(Arc::clone(&shared))), 50);

        memory.observe("ngl that was sus");

        let saved = shared.saved().unwrap();
        assert_eq!(saved, memory.snapshot());
        assert_eq!(saved.term_counts.get("ngl"), Some(2));
    }

    #[test]
    fn persistence_failure_keeps_in_memory_state() {
        let memory = StyleMemory::load(Box::new(FailingStore), 50);
        memory.observe("lmao");

        let state = memory.snapshot();
        assert_eq!(state.term_counts.get("lmao"), Some(2));
        assert_eq!(state.recent_texts, vec!["lmao"]);
    }

    #[test]
    fn corrupt_file_starts_from_baseline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("learning_data.json");
        std::fs::write(&path, "][").unwrap();

        let memory = StyleMemory::load(Box::new(JsonFileStore::new(&path)), 50);
        assert_eq!(memory.snapshot(), StyleMemoryState::baseline());
    }

    #[test]
    fn state_survives_reload_from_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("learning_data.json");

        let memory = StyleMemory::load(Box::new(JsonFileStore::new(&path)), 50);
        memory.observe("yaar no cap");
        memory.observe("cringe");
        let before = memory.snapshot();
        drop(memory);

        let reloaded = StyleMemory::load(Box::new(JsonFileStore::new(&path)), 50);
        assert_eq!(reloaded.snapshot(), before);
        assert_eq!(reloaded.snapshot().term_counts.get("no cap"), Some(1));
    }

    #[test]
    fn empty_counts_on_disk_are_reseeded() {
        let store = MemoryStyleStore::with_state(StyleMemoryState {
            term_counts: TermCounts::default(),
            recent_texts: vec!["kept".into()],
        });
        let memory = StyleMemory::load(Box::new(store), 50);

        let state = memory.snapshot();
        assert_eq!(state.term_counts, TermCounts::baseline());
        assert_eq!(state.recent_texts, vec!["kept"]);
    }

    #[test]
    fn reset_restores_baseline_and_persists() {
        let shared = Arc::new(MemoryStyleStore::new());
        let memory = StyleMemory::load(Box::new(SharedStore(Arc::clone(&shared))), 50);
        memory.observe("lol lol lol");

        memory.reset().unwrap();

        assert_eq!(memory.snapshot(), StyleMemoryState::baseline());
        assert_eq!(shared.saved(), Some(StyleMemoryState::baseline()));
    }
}
