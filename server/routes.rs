use serde::Serialize;
use std::io::Cursor;
use std::sync::Arc;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::{debug, info, warn};

use soil_analyzer::Classifier;

use crate::cors;
use crate::error::ApiError;
use crate::handlers;

pub const ANALYZE_PATH: &str = "/analyze/";

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Builds a header, skipping values tiny_http rejects (non-ASCII).
fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

fn bytes_response(status: u16, content_type: &str, bytes: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let len = bytes.len();
    Response::new(
        StatusCode(status),
        header("Content-Type", content_type).into_iter().collect(),
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn json_response<T: Serialize>(status: u16, body: &T) -> Response<Cursor<Vec<u8>>> {
    match serde_json::to_vec(body) {
        Ok(bytes) => bytes_response(status, "application/json", bytes),
        Err(e) => {
            warn!(error = %e, "failed to serialize response body");
            bytes_response(500, "text/plain; charset=utf-8", b"Internal Server Error".to_vec())
        }
    }
}

pub fn error_response(err: &ApiError) -> Response<Cursor<Vec<u8>>> {
    let response = json_response(err.status(), &err.body());
    match err {
        ApiError::MethodNotAllowed => with_headers(response, &[("Allow", "POST".to_owned())]),
        _ => response,
    }
}

pub fn redirect(location: &str) -> Response<Cursor<Vec<u8>>> {
    Response::new(
        StatusCode(307),
        header("Location", location).into_iter().collect(),
        Cursor::new(Vec::new()),
        Some(0),
        None,
    )
}

fn preflight_ok(headers: &[cors::HeaderPair]) -> Response<Cursor<Vec<u8>>> {
    with_headers(bytes_response(200, "text/plain; charset=utf-8", b"OK".to_vec()), headers)
}

fn with_headers(
    mut response: Response<Cursor<Vec<u8>>>,
    headers: &[cors::HeaderPair],
) -> Response<Cursor<Vec<u8>>> {
    for (name, value) in headers {
        if let Some(h) = header(name, value) {
            response.add_header(h);
        }
    }
    response
}

pub fn header_value(request: &Request, name: &'static str) -> Option<String> {
    request.headers().iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_owned())
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
pub enum Route {
    Analyze,
    /// Missing trailing slash, any method; answered with a redirect to
    /// `ANALYZE_PATH`, where non-POST methods then get 405.
    RedirectToAnalyze,
    MethodNotAllowed,
    NotFound,
}

pub fn route(method: &Method, path: &str) -> Route {
    match (method, path) {
        (Method::Post, ANALYZE_PATH) => Route::Analyze,
        (_, ANALYZE_PATH)            => Route::MethodNotAllowed,
        (_, "/analyze")              => Route::RedirectToAnalyze,
        _                            => Route::NotFound,
    }
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches one request and writes the response.
///
/// CORS preflights are answered before routing; every other response gets the
/// simple CORS headers appended.
pub fn dispatch(mut request: Request, classifier: Arc<Classifier>) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();

    let origin = header_value(&request, "Origin");

    if cors::is_preflight(
        method == Method::Options,
        origin.as_deref(),
        header_value(&request, "Access-Control-Request-Method").as_deref(),
    ) {
        let origin = origin.unwrap_or_default();
        let requested = header_value(&request, "Access-Control-Request-Headers");
        debug!(%path, %origin, "answering CORS preflight");
        respond(request, &method, &path, preflight_ok(&cors::preflight_headers(&origin, requested.as_deref())));
        return;
    }

    let response = match route(&method, &path) {
        Route::Analyze           => handlers::analyze::handle(&mut request, &classifier),
        Route::RedirectToAnalyze => redirect(ANALYZE_PATH),
        Route::MethodNotAllowed  => error_response(&ApiError::MethodNotAllowed),
        Route::NotFound          => error_response(&ApiError::NotFound),
    };

    let has_cookie = header_value(&request, "Cookie").is_some();
    let response = with_headers(response, &cors::simple_headers(origin.as_deref(), has_cookie));
    respond(request, &method, &path, response);
}

fn respond(request: Request, method: &Method, path: &str, response: Response<Cursor<Vec<u8>>>) {
    let status = response.status_code().0;
    info!(%method, %path, status, "request completed");
    if let Err(e) = request.respond(response) {
        warn!(error = %e, "failed to write response");
    }
}
