use super::Config;
use std::path::PathBuf;

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

impl Config {
    /// Credentials normally live in the environment rather than in config.toml.
    pub fn apply_env_overrides(&mut self) {
        if let Some(id) = non_empty_env("REDDIT_CLIENT_ID") {
            self.reddit.client_id = Some(id);
        }

        if let Some(secret) = non_empty_env("REDDIT_CLIENT_SECRET") {
            self.reddit.client_secret = Some(secret);
        }

        if let Some(username) = non_empty_env("REDDIT_USERNAME") {
            self.reddit.username = Some(username);
        }

        if let Some(password) = non_empty_env("REDDIT_PASSWORD") {
            self.reddit.password = Some(password);
        }

        if let Some(user_agent) = non_empty_env("REDDIT_USER_AGENT") {
            self.reddit.user_agent = user_agent;
        }

        if let Some(key) = non_empty_env("LLM_API_KEY") {
            self.llm.api_key = Some(key);
        }

        if let Some(base_url) = non_empty_env("LLM_BASE_URL") {
            self.llm.base_url = base_url;
        }

        if let Some(workspace) = non_empty_env("ROASTBOT_WORKSPACE") {
            self.workspace_dir = PathBuf::from(workspace);
        }
    }
}
