//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPSPHERE_CATALOG_URL` - Catalog endpoint returning the product
//!   list (default: the dummyjson demo catalog)
//! - `SHOPSPHERE_DATA_DIR` - Directory holding the cart snapshot
//!   (default: `./data`)
//! - `SHOPSPHERE_FETCH_RETRIES` - Catalog fetch attempts (default: 3)
//! - `SHOPSPHERE_FETCH_RETRY_DELAY_MS` - Base backoff between attempts
//!   (default: 500)
//! - `SHOPSPHERE_CATALOG_CACHE_TTL_SECS` - Catalog cache lifetime
//!   (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default catalog endpoint, matching the original web storefront.
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products?limit=20";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_FETCH_RETRIES: &str = "3";
const DEFAULT_FETCH_RETRY_DELAY_MS: &str = "500";
const DEFAULT_CATALOG_CACHE_TTL_SECS: &str = "300";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog endpoint returning the product list
    pub catalog_url: Url,
    /// Directory holding the cart snapshot slot
    pub data_dir: PathBuf,
    /// Catalog fetch attempts before giving up
    pub fetch_retries: u32,
    /// Base backoff between catalog fetch attempts
    pub fetch_retry_delay: Duration,
    /// How long a fetched catalog stays cached
    pub catalog_cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    /// Every variable has a default, so loading only fails on malformed
    /// values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_url = get_env_or_default("SHOPSPHERE_CATALOG_URL", DEFAULT_CATALOG_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPSPHERE_CATALOG_URL".to_string(), e.to_string())
            })?;

        let data_dir = PathBuf::from(get_env_or_default("SHOPSPHERE_DATA_DIR", DEFAULT_DATA_DIR));

        let fetch_retries = parse_env_or_default("SHOPSPHERE_FETCH_RETRIES", DEFAULT_FETCH_RETRIES)?;
        let fetch_retry_delay = Duration::from_millis(parse_env_or_default(
            "SHOPSPHERE_FETCH_RETRY_DELAY_MS",
            DEFAULT_FETCH_RETRY_DELAY_MS,
        )?);
        let catalog_cache_ttl = Duration::from_secs(parse_env_or_default(
            "SHOPSPHERE_CATALOG_CACHE_TTL_SECS",
            DEFAULT_CATALOG_CACHE_TTL_SECS,
        )?);

        Ok(Self {
            catalog_url,
            data_dir,
            fetch_retries,
            fetch_retry_delay,
            catalog_cache_ttl,
        })
    }
}

impl Default for StorefrontConfig {
    /// The all-defaults configuration, independent of the environment.
    fn default() -> Self {
        Self {
            // The constant is a valid URL; a broken default is a build-time bug
            catalog_url: Url::parse(DEFAULT_CATALOG_URL)
                .unwrap_or_else(|_| unreachable!("default catalog URL must parse")),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            fetch_retries: 3,
            fetch_retry_delay: Duration::from_millis(500),
            catalog_cache_ttl: Duration::from_secs(300),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an environment variable with a default value.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
