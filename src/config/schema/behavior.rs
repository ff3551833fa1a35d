use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Chance (0.0 - 1.0) that an admissible comment gets a reply.
    #[serde(default = "default_reply_probability")]
    pub reply_probability: f64,
    #[serde(default = "default_max_replies_per_hour")]
    pub max_replies_per_hour: u32,
    #[serde(default = "default_rate_window_secs")]
    pub rate_window_secs: u64,
    #[serde(default = "default_min_reply_delay_secs")]
    pub min_reply_delay_secs: u64,
    #[serde(default = "default_max_reply_delay_secs")]
    pub max_reply_delay_secs: u64,
    /// Pause after a failed generation or post before taking the next comment.
    #[serde(default = "default_error_pause_secs")]
    pub error_pause_secs: u64,
}

fn default_reply_probability() -> f64 {
    0.1
}

fn default_max_replies_per_hour() -> u32 {
    10
}

fn default_rate_window_secs() -> u64 {
    3600
}

fn default_min_reply_delay_secs() -> u64 {
    30
}

fn default_max_reply_delay_secs() -> u64 {
    120
}

fn default_error_pause_secs() -> u64 {
    5
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            reply_probability: default_reply_probability(),
            max_replies_per_hour: default_max_replies_per_hour(),
            rate_window_secs: default_rate_window_secs(),
            min_reply_delay_secs: default_min_reply_delay_secs(),
            max_reply_delay_secs: default_max_reply_delay_secs(),
            error_pause_secs: default_error_pause_secs(),
        }
    }
}
