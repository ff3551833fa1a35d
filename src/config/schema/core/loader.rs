use super::Config;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    /// Load `~/.roastbot/config.toml`, creating it with defaults on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let roastbot_dir = home.join(".roastbot");
        Self::load_from(&roastbot_dir.join("config.toml"))
    }

    /// Load a config file at an explicit path, creating it with defaults if absent.
    ///
    /// The workspace is a `workspace/` directory next to the config file.
    /// Environment overrides are applied after the file is parsed.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let base_dir = config_path
            .parent()
            .map_or_else(|| Path::new(".").to_path_buf(), Path::to_path_buf);
        let workspace_dir = base_dir.join("workspace");

        if !workspace_dir.exists() {
            fs::create_dir_all(&workspace_dir)
                .with_context(|| format!("Failed to create {}", workspace_dir.display()))?;
        }

        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .map_err(ConfigError::Io)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let mut config: Config = toml::from_str(&contents)
                .map_err(|e| ConfigError::Load(e.to_string()))
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            config.config_path = config_path.to_path_buf();
            config.workspace_dir = workspace_dir;
            config
        } else {
            let config = Self {
                config_path: config_path.to_path_buf(),
                workspace_dir,
                ..Self::default()
            };
            config.save()?;
            tracing::info!(path = %config_path.display(), "wrote default config");
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
