use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Vocabulary every fresh memory starts with, at count 1.
pub const BASELINE_TERMS: [&str; 14] = [
    "bhai", "yaar", "fr", "ngl", "cap", "sus", "dead", "lol", "lmao", "ded", "scene", "sorted",
    "beta", "uncle",
];

/// Term counts that remember first-seen order.
///
/// Ranking ties resolve by that order, so the top terms are deterministic
/// and survive a save/load cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermCounts {
    entries: Vec<(String, u64)>,
}

impl TermCounts {
    pub fn baseline() -> Self {
        Self {
            entries: BASELINE_TERMS.iter().map(|t| ((*t).to_string(), 1)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, term: &str) -> Option<u64> {
        self.entries
            .iter()
            .find_map(|(t, count)| (t == term).then_some(*count))
    }

    /// Add `by` to `term`, appending it if unseen.
    pub fn increment(&mut self, term: &str, by: u64) {
        if let Some((_, count)) = self.entries.iter_mut().find(|(t, _)| t == term) {
            *count = count.saturating_add(by);
        } else {
            self.entries.push((term.to_string(), by));
        }
    }

    /// Highest counts first; equal counts keep first-seen order.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .entries
            .iter()
            .map(|(t, count)| (t.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(t, count)| (t.as_str(), *count))
    }
}

impl Serialize for TermCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (term, count) in &self.entries {
            map.serialize_entry(term, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TermCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TermCountsVisitor;

        impl<'de> Visitor<'de> for TermCountsVisitor {
            type Value = TermCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of term to non-negative count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TermCounts, A::Error> {
                let mut counts = TermCounts::default();
                while let Some((term, count)) = access.next_entry::<String, u64>()? {
                    counts.increment(&term, count);
                }
                Ok(counts)
            }
        }

        deserializer.deserialize_map(TermCountsVisitor)
    }
}

/// Persisted style memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleMemoryState {
    #[serde(rename = "slang_counts", default)]
    pub term_counts: TermCounts,
    /// Raw comment bodies, most recent last.
    #[serde(rename = "recent_comments", default)]
    pub recent_texts: Vec<String>,
}

impl Default for StyleMemoryState {
    fn default() -> Self {
        Self::baseline()
    }
}

impl StyleMemoryState {
    pub fn baseline() -> Self {
        Self {
            term_counts: TermCounts::baseline(),
            recent_texts: Vec::new(),
        }
    }

    /// Re-seed empty counts and cap the recent buffer, keeping the newest.
    pub fn normalize(&mut self, recent_capacity: usize) {
        if self.term_counts.is_empty() {
            self.term_counts = TermCounts::baseline();
        }
        self.trim_recent(recent_capacity);
    }

    pub fn trim_recent(&mut self, recent_capacity: usize) {
        if self.recent_texts.len() > recent_capacity {
            let excess = self.recent_texts.len() - recent_capacity;
            self.recent_texts.drain(..excess);
        }
    }
}
