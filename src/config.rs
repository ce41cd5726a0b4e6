use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Plain environment variable accepted as a fallback for the API key
pub const API_KEY_ENV: &str = "SPOONACULAR_API_KEY";

/// Upper bound the recipe API accepts for one page
pub const MAX_BATCH_SIZE: u32 = 100;

/// Main enrichment configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EnrichConfig {
    /// Upstream recipe source
    #[serde(default)]
    pub source: SourceConfig,
    /// Persisted store location
    #[serde(default)]
    pub store: StoreConfig,
    /// Compute inserts without writing them
    #[serde(default)]
    pub dry_run: bool,
}

/// Configuration for the upstream recipe API
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// API key (can also be set via SPOONACULAR_API_KEY)
    pub api_key: Option<String>,
    /// Base URL of the recipe API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Recipes requested in one page, clamped to 1..=100
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    /// Pagination offset of the page to fetch
    #[serde(default)]
    pub offset: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            batch_size: default_batch_size(),
            offset: 0,
            timeout: default_timeout(),
        }
    }
}

impl SourceConfig {
    /// API key from config, falling back to the SPOONACULAR_API_KEY variable.
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

/// Configuration for the persisted store
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Directory holding the collection files
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_batch_size() -> u32 {
    MAX_BATCH_SIZE
}

fn default_timeout() -> u64 {
    30
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("data")
}

impl EnrichConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with DISHCRAFT__ prefix
    /// 2. dishcraft.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: DISHCRAFT__SOURCE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from `dishcraft.toml` (optional) and the environment
pub fn load_config() -> Result<EnrichConfig, ConfigError> {
    build_config(File::with_name("dishcraft").required(false))
}

/// Load configuration from an explicit TOML file plus the environment
pub fn load_config_from(path: &Path) -> Result<EnrichConfig, ConfigError> {
    build_config(File::from(path).required(true))
}

fn build_config(
    file: File<config::FileSourceFile, config::FileFormat>,
) -> Result<EnrichConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(file)
        // Use double underscore for nested: DISHCRAFT__SOURCE__API_KEY
        .add_source(
            Environment::with_prefix("DISHCRAFT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
