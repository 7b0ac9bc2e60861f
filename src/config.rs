use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub model: ModelSettings,
    pub logging: LoggingSettings,
    /// Event id -> display name
    #[serde(default = "default_events")]
    pub events: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelSettings {
    /// JSON model file; unset means fallback scoring only
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Events known to the service out of the box
pub fn default_events() -> BTreeMap<String, String> {
    [
        ("event1", "Tech Career Workshop"),
        ("event2", "Resume Building Session"),
        ("event3", "Interview Preparation Seminar"),
        ("event4", "Networking Masterclass"),
        ("event5", "Industry Insights Panel"),
    ]
    .into_iter()
    .map(|(id, name)| (id.to_string(), name.to_string()))
    .collect()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MENTOR_MATCH__)
    /// 5. MODEL_PATH, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MENTOR_MATCH__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("logging.level", default_log_level())?
        .set_default("logging.format", default_log_format())
}

fn env_source() -> Environment {
    Environment::with_prefix("MENTOR_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// The bare MODEL_PATH variable wins over every other source
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("MODEL_PATH") {
        Ok(path) if !path.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("model.path", path)?
            .build(),
        _ => Ok(settings),
    }
}
