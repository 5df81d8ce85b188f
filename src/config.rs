use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub classifier: ClassifierSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
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
pub struct SessionSettings {
    pub capacity: Option<u64>,
    pub idle_ttl_secs: Option<u64>,
}

/// Classification thresholds
///
/// The numeric limits are domain parameters, not algorithm internals; they
/// live here so tuning them never touches the classifier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifierSettings {
    #[serde(default)]
    pub highly: HighlyBandConfig,
    #[serde(default)]
    pub moderately: ModeratelyBandConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HighlyBandConfig {
    #[serde(default = "default_highly_min_suitability")]
    pub min_suitability: f64,
    #[serde(default = "default_highly_min_environmental")]
    pub min_environmental: f64,
    #[serde(default = "default_highly_min_health")]
    pub min_health: f64,
    #[serde(default = "default_highly_max_canopy")]
    pub max_canopy: f64,
    #[serde(default = "default_highly_min_stability")]
    pub min_stability: f64,
}

impl Default for HighlyBandConfig {
    fn default() -> Self {
        Self {
            min_suitability: default_highly_min_suitability(),
            min_environmental: default_highly_min_environmental(),
            min_health: default_highly_min_health(),
            max_canopy: default_highly_max_canopy(),
            min_stability: default_highly_min_stability(),
        }
    }
}

fn default_highly_min_suitability() -> f64 { 0.42 }
fn default_highly_min_environmental() -> f64 { 0.4 }
fn default_highly_min_health() -> f64 { 0.4 }
fn default_highly_max_canopy() -> f64 { 0.6 }
fn default_highly_min_stability() -> f64 { 0.35 }

#[derive(Debug, Clone, Deserialize)]
pub struct ModeratelyBandConfig {
    #[serde(default = "default_moderately_min_suitability")]
    pub min_suitability: f64,
    #[serde(default = "default_moderately_min_environmental")]
    pub min_environmental: f64,
    #[serde(default = "default_moderately_min_health")]
    pub min_health: f64,
    #[serde(default = "default_moderately_max_canopy")]
    pub max_canopy: f64,
    #[serde(default = "default_moderately_min_stability")]
    pub min_stability: f64,
}

impl Default for ModeratelyBandConfig {
    fn default() -> Self {
        Self {
            min_suitability: default_moderately_min_suitability(),
            min_environmental: default_moderately_min_environmental(),
            min_health: default_moderately_min_health(),
            max_canopy: default_moderately_max_canopy(),
            min_stability: default_moderately_min_stability(),
        }
    }
}

fn default_moderately_min_suitability() -> f64 { 0.28 }
fn default_moderately_min_environmental() -> f64 { 0.25 }
fn default_moderately_min_health() -> f64 { 0.25 }
fn default_moderately_max_canopy() -> f64 { 0.7 }
fn default_moderately_min_stability() -> f64 { 0.25 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationSettings {
    pub chart_top_n: Option<usize>,
}

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
    /// 3. Environment variables (prefixed with ARBOR_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with ARBOR_)
            // e.g., ARBOR_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ARBOR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ARBOR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_highly_band() {
        let band = HighlyBandConfig::default();
        assert_eq!(band.min_suitability, 0.42);
        assert_eq!(band.min_environmental, 0.4);
        assert_eq!(band.min_health, 0.4);
        assert_eq!(band.max_canopy, 0.6);
        assert_eq!(band.min_stability, 0.35);
    }

    #[test]
    fn test_default_moderately_band() {
        let band = ModeratelyBandConfig::default();
        assert_eq!(band.min_suitability, 0.28);
        assert_eq!(band.min_environmental, 0.25);
        assert_eq!(band.min_health, 0.25);
        assert_eq!(band.max_canopy, 0.7);
        assert_eq!(band.min_stability, 0.25);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_settings_default_is_complete() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert!(settings.session.capacity.is_none());
        assert!(settings.recommendation.chart_top_n.is_none());
    }
}
