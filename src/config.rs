use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::distance::DEFAULT_MAX_RANDOM_DISTANCE;
use crate::models::MatchingOptions;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub distance: DistanceSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    /// Drop caregiver slots longer than their shift type allows
    #[serde(default)]
    pub enforce_shift_caps: bool,
}

impl MatchingSettings {
    pub fn options(&self) -> MatchingOptions {
        MatchingOptions {
            enforce_shift_caps: self.enforce_shift_caps,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceSettings {
    /// Upper bound of the random distance stub
    #[serde(default = "default_max_random_distance")]
    pub max_random_distance: f64,
}

impl Default for DistanceSettings {
    fn default() -> Self {
        Self {
            max_random_distance: default_max_random_distance(),
        }
    }
}

fn default_max_random_distance() -> f64 { DEFAULT_MAX_RANDOM_DISTANCE }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CARE__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CARE__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// Reject values the matcher cannot work with
    pub fn validated(self) -> Result<Self, ConfigError> {
        let max = self.distance.max_random_distance;
        if !max.is_finite() || max < 0.0 {
            return Err(ConfigError::Message(format!(
                "distance.max_random_distance must be a finite number >= 0, got {}",
                max
            )));
        }
        Ok(self)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("CARE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
