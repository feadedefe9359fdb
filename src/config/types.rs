// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::http::CachePolicy;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Static file configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FilesConfig {
    /// Document root every request path resolves against
    pub root: String,
    /// File served for directory requests; empty disables directory serving
    pub index_file: String,
    /// Extra or overriding extension → Content-Type entries
    #[serde(default)]
    pub mime_types: HashMap<String, String>,
    /// Content-Type for unknown extensions
    #[serde(default)]
    pub fallback_content_type: Option<String>,
}

/// HTTP response configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    /// Cache-Control policy applied to every served file
    #[serde(default)]
    pub cache_policy: Option<CachePolicy>,
    /// Extra headers applied to every served file
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Bytes appended after every served file
    #[serde(default)]
    pub body_trailer: Option<String>,
    /// HTML body of the not-found page
    pub not_found_body: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}
