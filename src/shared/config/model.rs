use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::engine::compaction::CompactionSettings;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub compaction: CompactionSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

/// Env var naming the settings file (without extension).
pub const CONFIG_PATH_ENV: &str = "MOR_COMPACTION_CONFIG";

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
    load_settings_from(Path::new(&config_path))
}

pub fn load_settings_from(path: &Path) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(&path.to_string_lossy()))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
