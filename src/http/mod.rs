//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! static responder itself: content types, path normalization, cache
//! policies and the response sink.

pub mod cache;
pub mod mime;
pub mod path;
pub mod response;

// Re-export commonly used types
pub use cache::CachePolicy;
pub use mime::MimeTable;
pub use response::{
    build_404_response, build_405_response, ResponseBuffer, ResponseWriter, HTML_CONTENT_TYPE,
};
