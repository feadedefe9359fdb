//! MIME type detection module
//!
//! Maps file extensions to Content-Type values. The built-in table can be
//! extended or overridden per deployment through [`MimeTable`].

use std::collections::HashMap;

/// Content type used when an extension is missing or unknown
pub const DEFAULT_FALLBACK: &str = "application/octet-stream";

/// Extension → Content-Type lookup table with a fallback
///
/// # Examples
/// ```
/// use server_static::http::mime::MimeTable;
/// let table = MimeTable::default().with_type("webmanifest", "application/manifest+json");
/// assert_eq!(table.content_type(Some("html")), "text/html; charset=utf-8");
/// assert_eq!(table.content_type(Some("webmanifest")), "application/manifest+json");
/// assert_eq!(table.content_type(None), "application/octet-stream");
/// ```
#[derive(Debug, Clone)]
pub struct MimeTable {
    overrides: HashMap<String, String>,
    fallback: String,
}

impl MimeTable {
    /// Add or replace the type for an extension (without the leading dot)
    #[must_use]
    pub fn with_type(mut self, extension: &str, content_type: impl Into<String>) -> Self {
        self.overrides.insert(
            extension.trim_start_matches('.').to_ascii_lowercase(),
            content_type.into(),
        );
        self
    }

    /// Replace the type served for unknown extensions
    #[must_use]
    pub fn with_fallback(mut self, content_type: impl Into<String>) -> Self {
        self.fallback = content_type.into();
        self
    }

    /// Resolve the Content-Type for a file extension
    pub fn content_type(&self, extension: Option<&str>) -> &str {
        let Some(ext) = extension.map(str::to_ascii_lowercase) else {
            return &self.fallback;
        };
        if let Some(content_type) = self.overrides.get(&ext) {
            return content_type;
        }
        builtin_content_type(&ext).unwrap_or(&self.fallback)
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

/// Built-in MIME Content-Type for a lowercase extension
fn builtin_content_type(extension: &str) -> Option<&'static str> {
    let content_type = match extension {
        // Text
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "txt" | "md" => "text/plain; charset=utf-8",
        "csv" => "text/csv; charset=utf-8",
        "xml" => "application/xml",

        // JavaScript/WASM
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "avif" => "image/avif",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" | "ogv" => "video/ogg",
        "mov" => "video/quicktime",

        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        // Documents
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "tar" => "application/x-tar",

        _ => return None,
    };
    Some(content_type)
}
