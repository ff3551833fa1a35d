/// Trailing line that identifies every reply as automated.
pub const DISCLOSURE_MARKER: &str = "i am a bot";

/// Normalizes generated text into a postable reply.
///
/// Output is lower-cased, has no trailing blank lines, and its final line
/// contains the disclosure marker. Formatting is total and idempotent.
#[derive(Debug, Clone)]
pub struct ReplyFormatter {
    marker: String,
}

impl Default for ReplyFormatter {
    fn default() -> Self {
        Self::new(DISCLOSURE_MARKER)
    }
}

impl ReplyFormatter {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_lowercase(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn format(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        let mut lines: Vec<&str> = lowered.split('\n').collect();

        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        let Some(last) = lines.last_mut() else {
            return self.marker.clone();
        };
        *last = last.trim_end();
        let already_marked = last.contains(self.marker.as_str());

        let body = lines.join("\n");
        if already_marked {
            body
        } else {
            format!("{body}\n\n{}", self.marker)
        }
    }

    /// Whether `text` satisfies the output contract.
    pub fn is_compliant(&self, text: &str) -> bool {
        text.lines()
            .last()
            .is_some_and(|line| line.contains(self.marker.as_str()))
            && text == text.to_lowercase()
    }
}
