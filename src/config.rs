use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::{MatchError, Matcher, SpaceRequirement, TierThresholds};
use crate::core::matcher::DEFAULT_PARALLEL_THRESHOLD;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub pet_backend: PetBackendSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PetBackendSettings {
    pub endpoint: String,
    pub api_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

fn default_timeout_secs() -> u64 { 10 }
fn default_max_pages() -> usize { 50 }

/// Adopter store settings. Without a url profiles are kept in memory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_top_threshold")]
    pub top_threshold: u8,
    #[serde(default = "default_min_threshold")]
    pub min_threshold: u8,
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    #[serde(default)]
    pub include_adopted: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            top_threshold: default_top_threshold(),
            min_threshold: default_min_threshold(),
            parallel_threshold: default_parallel_threshold(),
            include_adopted: false,
        }
    }
}

fn default_top_threshold() -> u8 { 85 }
fn default_min_threshold() -> u8 { 50 }
fn default_parallel_threshold() -> usize { DEFAULT_PARALLEL_THRESHOLD }

/// Relative trait weights
///
/// Unlisted traits weigh 1.0. `space_overrides` replaces the weight map for
/// adopters with the given home size, e.g. `[scoring.space_overrides.Small]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: HashMap<String, f64>,
    #[serde(default)]
    pub space_overrides: HashMap<String, HashMap<String, f64>>,
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
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PETMATCH__)
    /// 5. DATABASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PETMATCH__SERVER__PORT -> server.port
            .add_source(environment());

        with_database_url(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment());

        with_database_url(builder)?.build()?.try_deserialize()
    }

    /// Build the ranking engine from the scoring and matching sections
    pub fn build_matcher(&self) -> Result<Matcher, MatchError> {
        let thresholds =
            TierThresholds::new(self.matching.top_threshold, self.matching.min_threshold)?;

        let mut matcher = Matcher::new(ScoringWeights::from_map(&self.scoring.weights)?)
            .with_thresholds(thresholds)
            .with_parallel_threshold(self.matching.parallel_threshold);

        for (space, relative) in &self.scoring.space_overrides {
            // environment and some file formats lowercase keys
            let space = SpaceRequirement::ALL
                .into_iter()
                .find(|s| s.as_str().eq_ignore_ascii_case(space))
                .ok_or_else(|| MatchError::out_of_range("scoring.space_overrides", space))?;
            matcher = matcher.with_space_weights(space, ScoringWeights::from_map(relative)?);
        }

        Ok(matcher)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("PETMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// DATABASE_URL wins over every other source, as sqlx tooling expects
fn with_database_url(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => builder.set_override("database.url", url),
        _ => Ok(builder),
    }
}
