//! HTTP cache control module
//!
//! Cache-Control policies applied to served files.

use serde::{Deserialize, Serialize};

/// Cache control policy
///
/// In configuration files a policy is written as `{ public = 3600 }`,
/// `{ private = 600 }`, `"no_cache"` or `"no_store"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Public cache with specified max-age (seconds)
    Public(u32),
    /// Private cache (browser cache only)
    Private(u32),
    /// No cache
    NoCache,
    /// No store
    NoStore,
}

impl CachePolicy {
    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::Private(max_age) => format!("private, max-age={max_age}"),
            Self::NoCache => "no-cache".to_string(),
            Self::NoStore => "no-store".to_string(),
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::Public(3600) // 1 hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_policy() {
        assert_eq!(
            CachePolicy::Public(31_536_000).to_header_value(),
            "public, max-age=31536000"
        );
        assert_eq!(
            CachePolicy::Private(600).to_header_value(),
            "private, max-age=600"
        );
        assert_eq!(CachePolicy::NoCache.to_header_value(), "no-cache");
        assert_eq!(CachePolicy::NoStore.to_header_value(), "no-store");
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(CachePolicy::default(), CachePolicy::Public(3600));
    }

    #[test]
    fn test_deserialize_policy() {
        let policy: CachePolicy = serde_json::from_str(r#"{"public":60}"#).unwrap();
        assert_eq!(policy, CachePolicy::Public(60));
        let policy: CachePolicy = serde_json::from_str(r#""no_store""#).unwrap();
        assert_eq!(policy, CachePolicy::NoStore);
    }
}
