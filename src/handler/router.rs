//! Request dispatch module
//!
//! Glue between hyper and the [`Responder`](super::Responder): every GET or
//! HEAD request goes to the responder, and anything it does not handle gets
//! the configured not-found page.

use crate::config::AppState;
use crate::handler::static_files::Hook;
use crate::http::{self, ResponseBuffer, ResponseWriter};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Check HTTP method and return early response if not GET/HEAD
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Serve the request from the document root, falling back to the 404 page
async fn serve_static(req: &Request<()>, state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    let apply_headers: Hook<'_, ResponseBuffer, ()> = &|w, _req| {
        for (name, value) in &state.response_headers {
            w.set_header(name.clone(), value.clone());
        }
    };
    let append_trailer: Hook<'_, ResponseBuffer, ()> = &|w, req| {
        if let Some(trailer) = &state.body_trailer {
            if let Err(e) = w.write_body(trailer) {
                logger::log_warning(&format!(
                    "Failed to append trailer for {}: {e}",
                    req.uri().path()
                ));
            }
        }
    };
    let after = state.body_trailer.is_some().then_some(append_trailer);

    let mut w = ResponseBuffer::new();
    if state
        .responder
        .respond(&state.root, &mut w, req, Some(apply_headers), after)
        .await
    {
        return w.into_response(is_head);
    }

    http::build_404_response(&state.config.http.not_found_body, is_head)
}

pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    // Static serving never reads the request body
    let (parts, _) = req.into_parts();
    let req = Request::from_parts(parts, ());
    let is_head = req.method() == Method::HEAD;

    let response = match check_http_method(req.method()) {
        Some(resp) => resp,
        None => serve_static(&req, &state, is_head).await,
    };

    if state.config.logging.access_log {
        let entry = build_access_entry(&req, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn build_access_entry(
    req: &Request<()>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
