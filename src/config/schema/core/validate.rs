use super::Config;
use crate::error::ConfigError;

impl Config {
    /// Range checks that hold regardless of which command is running.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let behavior = &self.behavior;

        if !(0.0..=1.0).contains(&behavior.reply_probability) {
            return Err(ConfigError::Validation(format!(
                "behavior.reply_probability must be within 0.0..=1.0 (got {})",
                behavior.reply_probability
            )));
        }

        if behavior.min_reply_delay_secs > behavior.max_reply_delay_secs {
            return Err(ConfigError::Validation(format!(
                "behavior.min_reply_delay_secs ({}) exceeds max_reply_delay_secs ({})",
                behavior.min_reply_delay_secs, behavior.max_reply_delay_secs
            )));
        }

        if behavior.rate_window_secs == 0 {
            return Err(ConfigError::Validation(
                "behavior.rate_window_secs must be positive".into(),
            ));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Validation(format!(
                "llm.temperature must be within 0.0..=2.0 (got {})",
                self.llm.temperature
            )));
        }

        if self.learning.recent_capacity == 0 {
            return Err(ConfigError::Validation(
                "learning.recent_capacity must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Credentials needed before entering the stream loop.
    pub fn require_credentials(&self) -> Result<(), ConfigError> {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

        if !present(&self.reddit.client_id) {
            return Err(ConfigError::Missing("reddit.client_id (REDDIT_CLIENT_ID)"));
        }
        if !present(&self.reddit.client_secret) {
            return Err(ConfigError::Missing(
                "reddit.client_secret (REDDIT_CLIENT_SECRET)",
            ));
        }
        if !present(&self.reddit.username) {
            return Err(ConfigError::Missing("reddit.username (REDDIT_USERNAME)"));
        }
        if !present(&self.reddit.password) {
            return Err(ConfigError::Missing("reddit.password (REDDIT_PASSWORD)"));
        }
        if !present(&self.llm.api_key) {
            return Err(ConfigError::Missing("llm.api_key (LLM_API_KEY)"));
        }
        if self.reddit.subreddits.is_empty() {
            return Err(ConfigError::Missing("reddit.subreddits"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentialed() -> Config {
        let mut config = Config::default();
        config.reddit.client_id = Some("id".into());
        config.reddit.client_secret = Some("secret".into());
        config.reddit.username = Some("RoastBot".into());
        config.reddit.password = Some("hunter2".into());
        config.reddit.subreddits = vec!["india".into()];
        config.llm.api_key = Some("key".into());
        config
    }

    #[test]
    fn defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn inverted_delay_range_is_rejected() {
        let mut config = Config::default();
        config.behavior.min_reply_delay_secs = 200;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_reply_delay_secs"));
    }

    #[test]
    fn temperature_out_of_range_is_rejected() {
        let mut config = Config::default();
        config.llm.temperature = 2.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn probability_bounds_are_inclusive() {
        let mut config = Config::default();
        config.behavior.reply_probability = 1.0;
        assert!(config.validate().is_ok());
        config.behavior.reply_probability = 0.0;
        assert!(config.validate().is_ok());
        config.behavior.reply_probability = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn full_credentials_pass() {
        assert!(credentialed().require_credentials().is_ok());
    }

    #[test]
    fn missing_llm_key_is_reported() {
        let mut config = credentialed();
        config.llm.api_key = Some("   ".into());
        let err = config.require_credentials().unwrap_err();
        assert!(matches!(err, ConfigError::Missing(key) if key.starts_with("llm.api_key")));
    }

    #[test]
    fn missing_client_id_is_reported_first() {
        let mut config = credentialed();
        config.reddit.client_id = None;
        config.llm.api_key = None;
        let err = config.require_credentials().unwrap_err();
        assert!(err.to_string().contains("reddit.client_id"));
    }
}
