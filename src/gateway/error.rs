//! Gateway error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::config::ConfigError;
use crate::content_api::ContentApiError;
use crate::hooks::HookError;
use crate::http::redirect::RedirectError;
use crate::render::RenderError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Content API error: {0}")]
    ContentApi(#[from] ContentApiError),

    #[error("Hook '{hook}' failed: {source}")]
    Hook {
        hook: &'static str,
        #[source]
        source: HookError,
    },

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Redirect error: {0}")]
    Redirect(#[from] RedirectError),
}

impl GatewayError {
    pub fn hook(hook: &'static str) -> impl FnOnce(HookError) -> Self {
        move |source| GatewayError::Hook { hook, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::ContentApi(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Config(_)
            | GatewayError::Hook { .. }
            | GatewayError::Render(_)
            | GatewayError::Redirect(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(error = %self, status = %status, "Request failed");

        let message = match status {
            StatusCode::BAD_GATEWAY => "Content API request failed",
            _ => "Internal Server Error",
        };
        (status, message).into_response()
    }
}
