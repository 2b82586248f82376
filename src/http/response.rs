//! Response accumulation.
//!
//! # Responsibilities
//! - Hold the status, headers and body written by the pipeline, hooks and renderer
//! - Track whether the response has been ended
//! - Convert into an axum `Response` once the pipeline returns
//!
//! # Design Decisions
//! - Headers set before the renderer runs (default headers, hooks) survive;
//!   renderer headers are merged on top
//! - Writes after `end()` are dropped

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Response, StatusCode};

/// The in-flight response of a single request.
#[derive(Debug)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Body>,
    finished: bool,
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: None,
            finished: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        if self.guard("set_status") {
            self.status = status;
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Set a single header, replacing any previous value.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        if self.guard("set_header") {
            self.headers.insert(name, value);
        }
    }

    /// Write the status line and a set of headers at once.
    pub fn write_head(&mut self, status: StatusCode, headers: HeaderMap) {
        if self.guard("write_head") {
            self.status = status;
            self.headers.extend(headers);
        }
    }

    /// Write the body and end the response.
    pub fn send(&mut self, body: impl Into<Body>) {
        if self.guard("send") {
            self.body = Some(body.into());
            self.finished = true;
        }
    }

    /// Adopt a complete response produced elsewhere and end.
    pub fn send_response(&mut self, response: Response<Body>) {
        if self.guard("send_response") {
            let (parts, body) = response.into_parts();
            self.status = parts.status;
            self.headers.extend(parts.headers);
            self.body = Some(body);
            self.finished = true;
        }
    }

    /// End the response. Idempotent.
    pub fn end(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn guard(&self, op: &'static str) -> bool {
        if self.finished {
            tracing::debug!(op, "Write after response ended, ignoring");
        }
        !self.finished
    }

    pub fn into_response(self) -> Response<Body> {
        let mut response = Response::new(self.body.unwrap_or_else(Body::empty));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
