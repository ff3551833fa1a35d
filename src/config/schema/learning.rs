use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Style memory file, relative to the workspace unless absolute.
    #[serde(default = "default_data_path")]
    pub data_path: String,
    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,
}

fn default_true() -> bool {
    true
}

fn default_data_path() -> String {
    "data/learning_data.json".into()
}

fn default_recent_capacity() -> usize {
    50
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            data_path: default_data_path(),
            recent_capacity: default_recent_capacity(),
        }
    }
}
