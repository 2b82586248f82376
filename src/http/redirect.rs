//! Content API redirect translation.
//!
//! A redirect reported by the content API points at the production domain.
//! When the request came in through a local development host the target is
//! rewritten to `http://localhost:<listening port>`, keeping path and query.

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use thiserror::Error;
use url::Url;

use crate::http::response::ResponseWriter;

/// Host fragment that marks a local development request.
pub const LOCAL_HOST: &str = "localhost";

#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("Invalid redirect location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    #[error("Invalid redirect status {0}")]
    InvalidStatus(u16),
}

fn invalid(location: &str, reason: impl ToString) -> RedirectError {
    RedirectError::InvalidLocation {
        location: location.to_string(),
        reason: reason.to_string(),
    }
}

/// Whether the `Host` header designates a local development listener.
pub fn is_local_host(host: Option<&str>) -> bool {
    host.is_some_and(|h| h.contains(LOCAL_HOST))
}

/// Location to emit for `location` given the request's `Host` header.
pub fn translate_location(location: &str, host: Option<&str>, port: u16) -> Result<String, RedirectError> {
    if !is_local_host(host) {
        return Ok(location.to_string());
    }

    let mut url = Url::parse(location).map_err(|e| invalid(location, e))?;
    url.set_scheme("http")
        .map_err(|_| invalid(location, "scheme cannot be rewritten"))?;
    url.set_host(Some(LOCAL_HOST)).map_err(|e| invalid(location, e))?;
    url.set_port(Some(port))
        .map_err(|_| invalid(location, "port cannot be set"))?;
    Ok(url.to_string())
}

/// Write the redirect to `res` and end it.
pub fn write_redirect(
    res: &mut ResponseWriter,
    status: u16,
    location: &str,
    host: Option<&str>,
    port: u16,
) -> Result<String, RedirectError> {
    let status = StatusCode::from_u16(status).map_err(|_| RedirectError::InvalidStatus(status))?;
    let location = translate_location(location, host, port)?;
    let value = HeaderValue::from_str(&location).map_err(|e| invalid(&location, e))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, value);
    res.write_head(status, headers);
    res.end();

    Ok(location)
}
