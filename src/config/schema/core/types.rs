use super::super::{BehaviorConfig, LearningConfig, LlmConfig, RedditConfig, SafetyConfig};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Workspace directory - computed from the config location, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub reddit: RedditConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,

    #[serde(default)]
    pub safety: SafetyConfig,

    #[serde(default)]
    pub learning: LearningConfig,
}

impl Config {
    /// Absolute location of the persisted style memory.
    pub fn learning_data_path(&self) -> PathBuf {
        let configured = PathBuf::from(&self.learning.data_path);
        if configured.is_absolute() {
            configured
        } else {
            self.workspace_dir.join(configured)
        }
    }
}
