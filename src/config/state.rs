// Application state module
// Holds the responder and the prebuilt response settings shared by all connections

use hyper::body::Bytes;
use hyper::header::{HeaderName, HeaderValue, CACHE_CONTROL, SERVER};
use std::path::PathBuf;

use super::types::Config;
use crate::handler::Responder;
use crate::http::MimeTable;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Document root
    pub root: PathBuf,
    pub responder: Responder,
    /// Headers applied to every served file, validated at startup
    pub response_headers: Vec<(HeaderName, HeaderValue)>,
    /// Bytes appended after every served file
    pub body_trailer: Option<Bytes>,
}

impl AppState {
    /// Build state from configuration
    ///
    /// Fails when a configured header name or value is not valid HTTP.
    pub fn new(config: &Config) -> Result<Self, String> {
        let mut mime = MimeTable::default();
        for (extension, content_type) in &config.files.mime_types {
            mime = mime.with_type(extension, content_type.clone());
        }
        if let Some(fallback) = &config.files.fallback_content_type {
            mime = mime.with_fallback(fallback.clone());
        }
        let responder = Responder::new(config.files.index_file.clone()).with_mime_table(mime);

        Ok(Self {
            config: config.clone(),
            root: PathBuf::from(&config.files.root),
            responder,
            response_headers: build_response_headers(config)?,
            body_trailer: config
                .http
                .body_trailer
                .as_ref()
                .map(|t| Bytes::from(t.clone())),
        })
    }
}

fn build_response_headers(config: &Config) -> Result<Vec<(HeaderName, HeaderValue)>, String> {
    let mut headers = Vec::new();

    let server_name = HeaderValue::from_str(&config.http.server_name)
        .map_err(|e| format!("Invalid server_name '{}': {e}", config.http.server_name))?;
    headers.push((SERVER, server_name));

    if let Some(policy) = config.http.cache_policy {
        let value = HeaderValue::from_str(&policy.to_header_value())
            .map_err(|e| format!("Invalid cache policy {policy:?}: {e}"))?;
        headers.push((CACHE_CONTROL, value));
    }

    // Sorted so the header order does not depend on map iteration
    let mut custom: Vec<_> = config.http.headers.iter().collect();
    custom.sort();
    for (name, value) in custom {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| format!("Invalid header name '{name}': {e}"))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| format!("Invalid value for header '{name}': {e}"))?;
        headers.push((name, value));
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::CachePolicy;

    fn base_config() -> Config {
        let dir = tempfile::tempdir().unwrap();
        Config::load_from(dir.path().join("absent").to_str().unwrap()).unwrap()
    }

    #[test]
    fn test_state_from_defaults() {
        let state = AppState::new(&base_config()).unwrap();
        assert_eq!(state.root, PathBuf::from("./htdocs"));
        assert_eq!(state.responder.index_file(), "index.html");
        assert_eq!(state.response_headers.len(), 1);
        assert_eq!(state.response_headers[0].0, SERVER);
        assert!(state.body_trailer.is_none());
    }

    #[test]
    fn test_state_applies_http_settings() {
        let mut cfg = base_config();
        cfg.http.cache_policy = Some(CachePolicy::NoCache);
        cfg.http
            .headers
            .insert("x-frame-options".to_string(), "DENY".to_string());
        cfg.http.body_trailer = Some("<!-- end -->".to_string());
        cfg.files
            .mime_types
            .insert("gmi".to_string(), "text/gemini".to_string());
        cfg.files.fallback_content_type = Some("text/plain".to_string());

        let state = AppState::new(&cfg).unwrap();
        assert!(state
            .response_headers
            .iter()
            .any(|(n, v)| *n == CACHE_CONTROL && *v == "no-cache"));
        assert!(state
            .response_headers
            .iter()
            .any(|(n, v)| *n == "x-frame-options" && *v == "DENY"));
        assert_eq!(state.body_trailer.as_deref(), Some(&b"<!-- end -->"[..]));
        assert_eq!(state.responder.mime_table().content_type(Some("gmi")), "text/gemini");
        assert_eq!(state.responder.mime_table().content_type(Some("xyz")), "text/plain");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let mut cfg = base_config();
        cfg.http
            .headers
            .insert("bad header".to_string(), "x".to_string());
        assert!(AppState::new(&cfg).is_err());
    }
}
