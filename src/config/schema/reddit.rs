use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Account the bot posts as; comments by this author are never answered.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Subreddits to stream, joined with `+` on the wire.
    #[serde(default)]
    pub subreddits: Vec<String>,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_user_agent() -> String {
    "roastbot/0.1".into()
}

fn default_poll_interval_secs() -> u64 {
    5
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            username: None,
            password: None,
            user_agent: default_user_agent(),
            subreddits: Vec::new(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl RedditConfig {
    pub fn bot_username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }
}
