// Configuration module entry point
// Loads application configuration and builds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, FilesConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

/// Environment variable prefix, e.g. `STATIC__FILES__ROOT=/srv/www`
const ENV_PREFIX: &str = "STATIC";

impl Config {
    /// Load configuration from specified file path
    /// Missing files are allowed; defaults and environment variables still apply
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("files.root", "./htdocs")?
            .set_default("files.index_file", "index.html")?
            .set_default("http.server_name", "server-static")?
            .set_default("http.not_found_body", "<div>Error 404!</div>")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::CachePolicy;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let cfg = Config::load_from(missing.to_str().unwrap()).unwrap();

        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.files.root, "./htdocs");
        assert_eq!(cfg.files.index_file, "index.html");
        assert!(cfg.files.mime_types.is_empty());
        assert_eq!(cfg.http.not_found_body, "<div>Error 404!</div>");
        assert_eq!(cfg.http.cache_policy, None);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.performance.keep_alive);
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9090

[files]
root = "/srv/www"
index_file = "default.htm"

[files.mime_types]
gmi = "text/gemini"

[http]
cache_policy = { public = 31536000 }
body_trailer = "<!-- served -->"

[http.headers]
x-frame-options = "DENY"
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.files.root, "/srv/www");
        assert_eq!(cfg.files.index_file, "default.htm");
        assert_eq!(cfg.files.mime_types["gmi"], "text/gemini");
        assert_eq!(cfg.http.cache_policy, Some(CachePolicy::Public(31_536_000)));
        assert_eq!(cfg.http.body_trailer.as_deref(), Some("<!-- served -->"));
        assert_eq!(cfg.http.headers["x-frame-options"], "DENY");
    }

    #[test]
    fn test_invalid_address() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::load_from(dir.path().join("absent").to_str().unwrap()).unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
