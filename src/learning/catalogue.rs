use regex::Regex;
use std::sync::LazyLock;

/// Recognized slang tokens. Only these ever enter the term counts.
pub const CATALOGUE: [&str; 12] = [
    "bhai", "yaar", "fr", "ngl", "cap", "no cap", "sus", "cringe", "lol", "lmao", "ded", "based",
];

static MATCHERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CATALOGUE
        .iter()
        .filter_map(|term| {
            Regex::new(&format!(r"\b{}\b", regex::escape(term)))
                .ok()
                .map(|re| (*term, re))
        })
        .collect()
});

/// Whole-word matches per catalogue entry, in catalogue order.
///
/// Entries with no match are omitted. Overlapping entries are counted
/// independently, so "no cap" also counts as one "cap".
pub fn count_catalogue_matches(text: &str) -> Vec<(&'static str, u64)> {
    let lowered = text.to_lowercase();
    MATCHERS
        .iter()
        .filter_map(|(term, re)| {
            let hits = u64::try_from(re.find_iter(&lowered).count()).unwrap_or(u64::MAX);
            (hits > 0).then_some((*term, hits))
        })
        .collect()
}
