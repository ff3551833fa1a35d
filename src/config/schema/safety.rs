use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Case-insensitive substrings that disqualify a comment.
    #[serde(default)]
    pub banned_keywords: Vec<String>,
    /// Lower-cased author names containing "bot" that are still treated as human.
    #[serde(default = "default_bot_name_exemptions")]
    pub bot_name_exemptions: Vec<String>,
    #[serde(default = "default_min_body_chars")]
    pub min_body_chars: usize,
}

fn default_bot_name_exemptions() -> Vec<String> {
    vec!["bottom".into()]
}

fn default_min_body_chars() -> usize {
    5
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            banned_keywords: Vec::new(),
            bot_name_exemptions: default_bot_name_exemptions(),
            min_body_chars: default_min_body_chars(),
        }
    }
}
