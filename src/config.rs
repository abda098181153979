use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub shelter: ShelterSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
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

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

/// Shelter backend connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ShelterSettings {
    #[serde(default = "default_shelter_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project_id: String,
}

impl Default for ShelterSettings {
    fn default() -> Self {
        Self {
            endpoint: default_shelter_endpoint(),
            api_key: String::new(),
            project_id: String::new(),
        }
    }
}

fn default_shelter_endpoint() -> String {
    "http://localhost:8090/v1".to_string()
}

/// Candidate pool snapshot cache settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CacheSettings {
    pub ttl_secs: Option<u64>,
    pub capacity: Option<u64>,
}

/// Questionnaire session store settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SessionSettings {
    pub idle_ttl_secs: Option<u64>,
    pub capacity: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
    #[serde(default = "default_super_match_threshold")]
    pub super_match_threshold: i32,
    #[serde(default = "default_species")]
    pub default_species: String,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
            super_match_threshold: default_super_match_threshold(),
            default_species: default_species(),
        }
    }
}

fn default_result_limit() -> usize {
    5
}
fn default_super_match_threshold() -> i32 {
    15
}
fn default_species() -> String {
    "dog".to_string()
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

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with PAWMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with PAWMATCH_)
            // e.g., PAWMATCH_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PAWMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Apply unprefixed environment overrides for shelter credentials
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PAWMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Overlay shelter backend credentials from conventional environment
/// variable names, which deployments tend to set without the PAWMATCH_
/// prefix
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let endpoint = env::var("SHELTER_API_ENDPOINT")
        .or_else(|_| env::var("PAWMATCH_SHELTER__ENDPOINT"))
        .ok();
    let api_key = env::var("SHELTER_API_KEY")
        .or_else(|_| env::var("PAWMATCH_SHELTER__API_KEY"))
        .ok();
    let project_id = env::var("SHELTER_PROJECT_ID")
        .or_else(|_| env::var("PAWMATCH_SHELTER__PROJECT_ID"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = endpoint {
        builder = builder.set_override("shelter.endpoint", endpoint)?;
    }
    if let Some(api_key) = api_key {
        builder = builder.set_override("shelter.api_key", api_key)?;
    }
    if let Some(project_id) = project_id {
        builder = builder.set_override("shelter.project_id", project_id)?;
    }

    builder.build()
}
