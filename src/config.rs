use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::CombinePolicy;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub filters: FilterSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_backend_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_search_url")]
    pub service_url: String,
    #[serde(default = "default_search_limit")]
    pub limit: u8,
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            service_url: default_search_url(),
            limit: default_search_limit(),
            min_query_len: default_min_query_len(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_size")]
    pub l1_cache_size: u64,
    #[serde(default = "default_network_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_search_ttl")]
    pub search_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            l1_cache_size: default_cache_size(),
            ttl_secs: default_network_ttl(),
            search_ttl_secs: default_search_ttl(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterSettings {
    #[serde(default)]
    pub combine_policy: CombinePolicy,
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

fn default_backend_url() -> String { "http://localhost:8787/".to_string() }
fn default_search_url() -> String { "https://public.api.bsky.app".to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_search_limit() -> u8 { 10 }
fn default_min_query_len() -> usize { 2 }
fn default_cache_size() -> u64 { 100 }
fn default_network_ttl() -> u64 { 300 }
fn default_search_ttl() -> u64 { 60 }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with OVERLAP__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., OVERLAP__BACKEND__URL -> backend.url
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("OVERLAP")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
