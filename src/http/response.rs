//! HTTP response writing module
//!
//! [`ResponseWriter`] is the output sink the responder writes into. Headers
//! are mutable until the first status or body write commits them.
//! [`ResponseBuffer`] is the in-memory sink used by the server, convertible
//! into a hyper response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderMap, HeaderName, HeaderValue, ALLOW, CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use std::io;

/// Content type of the built-in HTML pages
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Output sink for one response
pub trait ResponseWriter {
    /// Mutable access to the response headers
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Write the status line; commits the headers
    fn write_status(&mut self, status: StatusCode);

    /// Append bytes to the body; commits the headers
    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Set a header, replacing any previous value
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }
}

/// In-memory response sink
///
/// Mirrors the semantics of a streaming writer: once a status or body byte
/// has been written the header set is frozen, and later header edits are
/// dropped from the final response.
#[derive(Debug, Default)]
pub struct ResponseBuffer {
    headers: HeaderMap,
    committed: Option<HeaderMap>,
    status: Option<StatusCode>,
    body: Vec<u8>,
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status written so far, if any
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Headers as they will be sent
    pub fn headers(&self) -> &HeaderMap {
        self.committed.as_ref().unwrap_or(&self.headers)
    }

    /// Body bytes written so far
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Whether headers have been frozen by a status or body write
    pub const fn is_committed(&self) -> bool {
        self.committed.is_some()
    }

    /// True when nothing at all has been written
    pub fn is_untouched(&self) -> bool {
        self.headers.is_empty() && self.status.is_none() && self.body.is_empty()
    }

    fn commit(&mut self) {
        if self.committed.is_none() {
            self.committed = Some(self.headers.clone());
        }
    }

    /// Convert into a hyper response
    ///
    /// A missing status defaults to 200. `Content-Length` always reflects the
    /// buffered body; with `is_head` the body itself is dropped.
    pub fn into_response(self, is_head: bool) -> Response<Full<Bytes>> {
        let status = self.status.unwrap_or(StatusCode::OK);
        let mut headers = self.committed.unwrap_or(self.headers);
        headers.insert(CONTENT_LENGTH, HeaderValue::from(self.body.len()));

        let body = if is_head {
            Bytes::new()
        } else {
            Bytes::from(self.body)
        };

        let mut response = Response::new(Full::new(body));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }
}

impl ResponseWriter for ResponseBuffer {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        self.commit();
        if self.status.is_none() {
            self.status = Some(status);
        }
    }

    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.status.is_none() {
            self.write_status(StatusCode::OK);
        }
        self.body.extend_from_slice(bytes);
        Ok(())
    }
}

/// Build 404 Not Found page
pub fn build_404_response(body: &str, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = body.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(body.to_owned())
    };

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(CONTENT_TYPE, HTML_CONTENT_TYPE)
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            not_found_fallback()
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(CONTENT_TYPE, "text/plain")
        .header(ALLOW, "GET, HEAD")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

fn not_found_fallback() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from("404 Not Found")));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_new_buffer_is_untouched() {
        let buffer = ResponseBuffer::new();
        assert!(buffer.is_untouched());
        assert!(!buffer.is_committed());
        assert_eq!(buffer.status(), None);
    }

    #[test]
    fn test_headers_freeze_after_status() {
        let mut buffer = ResponseBuffer::new();
        buffer.set_header(
            HeaderName::from_static("x-before"),
            HeaderValue::from_static("1"),
        );
        buffer.write_status(StatusCode::OK);
        buffer.set_header(
            HeaderName::from_static("x-after"),
            HeaderValue::from_static("1"),
        );

        assert!(buffer.is_committed());
        assert!(buffer.headers().contains_key("x-before"));
        assert!(!buffer.headers().contains_key("x-after"));
    }

    #[test]
    fn test_first_status_wins() {
        let mut buffer = ResponseBuffer::new();
        buffer.write_status(StatusCode::OK);
        buffer.write_status(StatusCode::NOT_FOUND);
        assert_eq!(buffer.status(), Some(StatusCode::OK));
    }

    #[test]
    fn test_body_write_implies_ok() {
        let mut buffer = ResponseBuffer::new();
        buffer.write_body(b"abc").unwrap();
        buffer.write_body(b"def").unwrap();
        assert_eq!(buffer.status(), Some(StatusCode::OK));
        assert_eq!(buffer.body(), b"abcdef");
    }

    #[tokio::test]
    async fn test_into_response() {
        let mut buffer = ResponseBuffer::new();
        buffer.set_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        buffer.write_status(StatusCode::OK);
        buffer.write_body(b"hello").unwrap();

        let response = buffer.into_response(false);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(response.headers()[CONTENT_LENGTH], "5");
        assert_eq!(body_string(response).await, "hello");
    }

    #[tokio::test]
    async fn test_into_response_head() {
        let mut buffer = ResponseBuffer::new();
        buffer.write_body(b"hello").unwrap();

        let response = buffer.into_response(true);
        assert_eq!(response.headers()[CONTENT_LENGTH], "5");
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_404_response() {
        let response = build_404_response("<div>Error 404!</div>", false);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], HTML_CONTENT_TYPE);
        assert_eq!(body_string(response).await, "<div>Error 404!</div>");
    }

    #[test]
    fn test_405_response() {
        let response = build_405_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, HEAD");
    }
}
