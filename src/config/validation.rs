//! Configuration validation.
//!
//! # Responsibilities
//! - Require content API credentials whenever the content API is enabled
//! - Require the origin domain unconditionally
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the gateway accepts a single request

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more content API credentials are absent.
    #[error("Missing: {}", .0.join(" "))]
    MissingCredentials(Vec<&'static str>),

    /// The origin domain is absent.
    #[error("Missing: NEXT_PUBLIC_WEBSITE_DOMAIN")]
    MissingDomain,

    /// The content API endpoint does not parse as a URL.
    #[error("Invalid content API endpoint '{0}'")]
    InvalidEndpoint(String),
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::is_empty).unwrap_or(true)
}

/// Validate a fully loaded configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.features.use_website_api {
        let api = &config.content_api;
        let missing: Vec<&'static str> = [
            ("WEBSITE_API_PUBLIC", &api.access_key),
            ("WEBSITE_API_SECRET", &api.secret_key),
            ("WEBSITE_API_NAMESPACE_ID", &api.namespace_id),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            errors.push(ValidationError::MissingCredentials(missing));
        }

        if url::Url::parse(&api.endpoint).is_err() {
            errors.push(ValidationError::InvalidEndpoint(api.endpoint.clone()));
        }
    }

    if is_blank(&config.site.domain) {
        errors.push(ValidationError::MissingDomain);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
