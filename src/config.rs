use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationError, ValidationErrors};

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_PORT: u16 = 8080;
const CONFIG_DIR: &str = "config";

/// Tolerance (m²) applied around an exclusive area when matching transactions.
const FUZZY_AREA_TOLERANCE: f64 = 1.0;
const PRECISE_AREA_TOLERANCE: f64 = 0.005;

/// How strictly transaction areas must agree with a requested area.
///
/// The same policy drives band price attachment, the trend area filter and
/// the transaction listing area filter.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AreaMatchPolicy {
    /// ±1.0 m², works with the floored representative area shown to clients
    #[default]
    Fuzzy,
    /// ±0.005 m², for callers that pass the exact stored area
    Precise,
}

impl AreaMatchPolicy {
    pub fn tolerance(self) -> f64 {
        match self {
            AreaMatchPolicy::Fuzzy => FUZZY_AREA_TOLERANCE,
            AreaMatchPolicy::Precise => PRECISE_AREA_TOLERANCE,
        }
    }
}

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Database connection URL
    pub database_url: String,

    /// Server host address
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Application environment
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// CORS: comma-separated list of allowed origins (production)
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,

    /// Allow permissive CORS fallback
    #[serde(default)]
    pub cors_allow_any_origin: bool,

    /// DB pool: max connections
    #[serde(default = "default_db_max_connections")]
    #[validate(range(min = 1))]
    pub db_max_connections: u32,

    /// DB pool: min connections
    #[serde(default = "default_db_min_connections")]
    pub db_min_connections: u32,

    /// DB timeouts (seconds)
    #[serde(default = "default_db_connect_timeout_secs")]
    pub db_connect_timeout_secs: u64,
    #[serde(default = "default_db_idle_timeout_secs")]
    pub db_idle_timeout_secs: u64,
    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,

    /// Default page size for listing endpoints
    #[serde(default = "default_api_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub api_default_page_size: u64,

    /// Hard ceiling for any requested page size
    #[serde(default = "default_api_max_page_size")]
    #[validate(range(min = 1, max = 1000))]
    pub api_max_page_size: u64,

    #[serde(default)]
    pub area_match_policy: AreaMatchPolicy,

    /// Upper bound on rows fetched by one batched price lookup
    #[serde(default = "default_price_candidate_limit")]
    #[validate(range(min = 1))]
    pub price_candidate_limit: u64,

    /// Upper bound on apartments returned for a map viewport
    #[serde(default = "default_map_result_limit")]
    #[validate(range(min = 1, max = 5000))]
    pub map_result_limit: u64,

    #[serde(default = "default_autocomplete_limit")]
    #[validate(range(min = 1, max = 100))]
    pub autocomplete_limit: u64,

    /// First year covered by the transaction dataset; the "all" period starts here
    #[serde(default = "default_dataset_start_year")]
    #[validate(range(min = 1990, max = 2100))]
    pub dataset_start_year: i32,

    /// Lower year bound used by transaction listings when none is requested
    #[serde(default = "default_list_start_year")]
    #[validate(range(min = 1990, max = 2100))]
    pub default_list_start_year: i32,

    /// Where the CLI persists its favorites document
    #[serde(default = "default_favorites_path")]
    pub favorites_path: String,
}

impl AppConfig {
    /// Creates a configuration with defaults for everything but the essentials
    pub fn new(database_url: String, host: String, port: u16, environment: String) -> Self {
        Self {
            database_url,
            host,
            port,
            environment,
            log_level: default_log_level(),
            log_json: false,
            cors_allowed_origins: None,
            cors_allow_any_origin: false,
            db_max_connections: default_db_max_connections(),
            db_min_connections: default_db_min_connections(),
            db_connect_timeout_secs: default_db_connect_timeout_secs(),
            db_idle_timeout_secs: default_db_idle_timeout_secs(),
            db_acquire_timeout_secs: default_db_acquire_timeout_secs(),
            api_default_page_size: default_api_page_size(),
            api_max_page_size: default_api_max_page_size(),
            area_match_policy: AreaMatchPolicy::default(),
            price_candidate_limit: default_price_candidate_limit(),
            map_result_limit: default_map_result_limit(),
            autocomplete_limit: default_autocomplete_limit(),
            dataset_start_year: default_dataset_start_year(),
            default_list_start_year: default_list_start_year(),
            favorites_path: default_favorites_path(),
        }
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Checks if running in development environment
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// Returns true if explicit CORS origins are configured
    pub fn has_cors_allowed_origins(&self) -> bool {
        self.cors_allowed_origins
            .as_ref()
            .map(|raw| raw.split(',').any(|origin| !origin.trim().is_empty()))
            .unwrap_or(false)
    }

    /// Whether we should fall back to permissive CORS
    pub fn should_allow_permissive_cors(&self) -> bool {
        self.is_development() || self.cors_allow_any_origin
    }

    /// Area tolerance (m²) derived from the configured match policy
    pub fn area_tolerance(&self) -> f64 {
        self.area_match_policy.tolerance()
    }

    fn validate_additional_constraints(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !self.should_allow_permissive_cors() && !self.has_cors_allowed_origins() {
            let mut err = ValidationError::new("cors_allowed_origins_required");
            err.message = Some(
                "Set APP__CORS_ALLOWED_ORIGINS for non-development environments or explicitly opt-in via APP__CORS_ALLOW_ANY_ORIGIN=true".into(),
            );
            errors.add("cors_allowed_origins", err);
        }

        if self.api_default_page_size > self.api_max_page_size {
            let mut err = ValidationError::new("page_size_exceeds_max");
            err.message = Some("api_default_page_size must not exceed api_max_page_size".into());
            errors.add("api_default_page_size", err);
        }

        if self.db_min_connections > self.db_max_connections {
            let mut err = ValidationError::new("min_exceeds_max");
            err.message = Some("db_min_connections must not exceed db_max_connections".into());
            errors.add("db_min_connections", err);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Default value functions
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_db_max_connections() -> u32 {
    10
}
fn default_db_min_connections() -> u32 {
    1
}
fn default_db_connect_timeout_secs() -> u64 {
    30
}
fn default_db_idle_timeout_secs() -> u64 {
    600
}
fn default_db_acquire_timeout_secs() -> u64 {
    30
}

fn default_api_page_size() -> u64 {
    20
}

fn default_api_max_page_size() -> u64 {
    100
}

fn default_price_candidate_limit() -> u64 {
    2000
}

fn default_map_result_limit() -> u64 {
    1000
}

fn default_autocomplete_limit() -> u64 {
    15
}

fn default_dataset_start_year() -> i32 {
    2006
}

fn default_list_start_year() -> i32 {
    2020
}

fn default_favorites_path() -> String {
    "apt-favorites.json".to_string()
}

/// Validates log level values
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("apt_explorer_api={},tower_http=debug", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let filter = EnvFilter::new(filter_directive);
    if json {
        let _ = fmt().with_env_filter(filter).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter).try_init();
    }
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. Default config (config/default.toml)
/// 3. Environment-specific config (config/{env}.toml)
/// 4. Environment variables (APP__*)
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    // Support both RUN_ENV and APP_ENV for selecting config profile
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let config = Config::builder()
        .set_default("database_url", "sqlite://apt_explorer.db?mode=rwc")?
        .set_default("host", "0.0.0.0")?
        .set_default("port", DEFAULT_PORT as i64)?
        .set_default("environment", DEFAULT_ENV)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    app_config.validate_additional_constraints().map_err(|e| {
        error!("Configuration constraint validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            8080,
            "production".into(),
        )
    }

    #[test]
    fn non_dev_requires_cors_origins() {
        let cfg = base_config();
        assert!(cfg.validate_additional_constraints().is_err());
    }

    #[test]
    fn non_dev_allows_override_flag() {
        let mut cfg = base_config();
        cfg.cors_allow_any_origin = true;
        assert!(cfg.validate_additional_constraints().is_ok());
    }

    #[test]
    fn non_dev_with_origins_passes() {
        let mut cfg = base_config();
        cfg.cors_allowed_origins = Some("https://apt.example.com".into());
        assert!(cfg.validate_additional_constraints().is_ok());
    }

    #[test]
    fn default_page_size_cannot_exceed_max() {
        let mut cfg = base_config();
        cfg.environment = "development".into();
        cfg.api_default_page_size = 50;
        cfg.api_max_page_size = 10;
        let errors = cfg.validate_additional_constraints().unwrap_err();
        assert!(errors.field_errors().contains_key("api_default_page_size"));
    }

    #[test]
    fn defaults_pass_field_validation() {
        let cfg = base_config();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.dataset_start_year, 2006);
        assert_eq!(cfg.map_result_limit, 1000);
    }

    #[test]
    fn area_policy_tolerances() {
        assert_eq!(AreaMatchPolicy::Fuzzy.tolerance(), 1.0);
        assert_eq!(AreaMatchPolicy::Precise.tolerance(), 0.005);
        let mut cfg = base_config();
        cfg.area_match_policy = AreaMatchPolicy::Precise;
        assert_eq!(cfg.area_tolerance(), 0.005);
    }

    #[test]
    fn area_policy_deserializes_from_lowercase() {
        let policy: AreaMatchPolicy = serde_json::from_str("\"precise\"").unwrap();
        assert_eq!(policy, AreaMatchPolicy::Precise);
    }

    #[test]
    fn invalid_log_level_rejected() {
        let mut cfg = base_config();
        cfg.log_level = "verbose".into();
        let errors = cfg.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("log_level"));
    }
}
