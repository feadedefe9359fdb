//! Static file serving module
//!
//! [`Responder`] maps a request path onto a document root, substitutes the
//! index file for directories and writes the file through a
//! [`ResponseWriter`]. A miss writes nothing at all, so the caller is free to
//! render its own not-found page.

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Request, StatusCode};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::http::mime::{MimeTable, DEFAULT_FALLBACK};
use crate::http::{path, ResponseWriter};
use crate::logger;

/// Caller-supplied callback run before the status line or after the body
///
/// Receives the writer and the request being served.
pub type Hook<'a, W, B> = &'a (dyn Fn(&mut W, &Request<B>) + Send + Sync);

/// Static file responder
///
/// Immutable once built; share one instance (behind an `Arc` if needed)
/// across every concurrent request.
#[derive(Debug, Clone)]
pub struct Responder {
    index_file: String,
    mime: MimeTable,
}

impl Responder {
    /// Create a responder serving `index_file` for directory requests
    ///
    /// An empty name is accepted; directory requests then never resolve.
    pub fn new(index_file: impl Into<String>) -> Self {
        Self {
            index_file: index_file.into(),
            mime: MimeTable::default(),
        }
    }

    /// Replace the extension → Content-Type table
    #[must_use]
    pub fn with_mime_table(mut self, mime: MimeTable) -> Self {
        self.mime = mime;
        self
    }

    pub fn index_file(&self) -> &str {
        &self.index_file
    }

    pub const fn mime_table(&self) -> &MimeTable {
        &self.mime
    }

    /// Serve the file matching `req` under `root`
    ///
    /// On a hit, runs `before`, sets `Content-Type`, writes status 200 and the
    /// file bytes, then runs `after`, and returns `true`. On a miss returns
    /// `false` without touching `w`.
    ///
    /// If the writer fails while the body is being written the call stops
    /// there: `after` is skipped and `true` is still returned, since the
    /// status has already gone out.
    pub async fn respond<W, B>(
        &self,
        root: impl AsRef<Path>,
        w: &mut W,
        req: &Request<B>,
        before: Option<Hook<'_, W, B>>,
        after: Option<Hook<'_, W, B>>,
    ) -> bool
    where
        W: ResponseWriter,
    {
        let request_path = req.uri().path();
        let Some(file_path) = self.resolve(root.as_ref(), request_path).await else {
            logger::log_debug(&format!("No static file for {request_path}"));
            return false;
        };

        let content = match fs::read(&file_path).await {
            Ok(c) => c,
            Err(e) => {
                logger::log_error(&format!(
                    "Failed to read file '{}': {}",
                    file_path.display(),
                    e
                ));
                return false;
            }
        };

        if let Some(hook) = before {
            hook(w, req);
        }

        w.set_header(CONTENT_TYPE, self.content_type_for(&file_path));
        w.write_status(StatusCode::OK);

        if let Err(e) = w.write_body(&content) {
            logger::log_warning(&format!(
                "Response aborted while writing '{}': {}",
                file_path.display(),
                e
            ));
            return true;
        }

        if let Some(hook) = after {
            hook(w, req);
        }

        true
    }

    /// Resolve a request path to a regular file under `root`
    ///
    /// Directory requests (an existing directory, a path ending in `/`, or
    /// the root itself) resolve to the index file inside them. Returns `None`
    /// when nothing servable exists or the file lies outside `root`.
    pub async fn resolve(&self, root: &Path, request_path: &str) -> Option<PathBuf> {
        let relative = path::normalize(request_path)?;
        let mut candidate = root.join(&relative);

        let wants_index = relative.as_os_str().is_empty()
            || request_path.ends_with('/')
            || is_dir(&candidate).await;
        if wants_index {
            if self.index_file.is_empty() {
                return None;
            }
            candidate.push(&self.index_file);
        }

        // Missing files are the common 404 case, no need to log
        let metadata = fs::metadata(&candidate).await.ok()?;
        if !metadata.is_file() {
            return None;
        }

        if !is_within_root(root, &candidate, request_path).await {
            return None;
        }

        Some(candidate)
    }

    fn content_type_for(&self, file_path: &Path) -> HeaderValue {
        let extension = file_path.extension().and_then(|e| e.to_str());
        let content_type = self.mime.content_type(extension);
        HeaderValue::from_str(content_type).unwrap_or_else(|_| {
            logger::log_warning(&format!("Invalid Content-Type value '{content_type}'"));
            HeaderValue::from_static(DEFAULT_FALLBACK)
        })
    }
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_dir())
}

/// Check that the canonical form of `candidate` stays under `root`
///
/// Catches symlinks that point outside the document root.
async fn is_within_root(root: &Path, candidate: &Path, request_path: &str) -> bool {
    let root_canonical = match fs::canonicalize(root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Document root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return false;
        }
    };

    match fs::canonicalize(candidate).await {
        Ok(p) if p.starts_with(&root_canonical) => true,
        Ok(p) => {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {} -> {}",
                request_path,
                p.display()
            ));
            false
        }
        Err(_) => false,
    }
}
