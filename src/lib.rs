//! Static file responder
//!
//! Resolves request paths under a document root, serves the index file for
//! directories, and lets the caller customize headers before the body and
//! append content after it. When nothing matches, nothing is written and the
//! caller renders its own not-found response.
//!
//! ```no_run
//! use server_static::{Hook, Responder, ResponseBuffer, ResponseWriter};
//! use hyper::header::{HeaderValue, CACHE_CONTROL};
//! use hyper::Request;
//!
//! # async fn serve() {
//! let responder = Responder::new("index.html");
//! let req = Request::builder().uri("/docs/").body(()).unwrap();
//!
//! let cache: Hook<'_, ResponseBuffer, ()> = &|w, _req| {
//!     w.set_header(CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600"));
//! };
//!
//! let mut w = ResponseBuffer::new();
//! if !responder.respond("./htdocs", &mut w, &req, Some(cache), None).await {
//!     // render a 404 page
//! }
//! # }
//! ```

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use handler::{Hook, Responder};
pub use http::{MimeTable, ResponseBuffer, ResponseWriter};
