//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, DEFAULT_PORT};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a configuration from a TOML file. The result is not validated yet;
/// callers overlay the environment first.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Overlay variables from the process environment onto `config`.
pub fn apply_env(config: &mut GatewayConfig) {
    apply_vars(config, |name| std::env::var(name).ok());
}

/// Overlay variables resolved by `lookup`. Empty values are ignored.
pub fn apply_vars<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(v) = get("WEBSITE_API_PUBLIC") {
        config.content_api.access_key = Some(v);
    }
    if let Some(v) = get("WEBSITE_API_SECRET") {
        config.content_api.secret_key = Some(v);
    }
    if let Some(v) = get("WEBSITE_API_NAMESPACE_ID") {
        config.content_api.namespace_id = Some(v);
    }
    if let Some(v) = get("WEBSITE_API_ENDPOINT") {
        config.content_api.endpoint = v;
    }
    if let Some(v) = get("NEXT_PUBLIC_WEBSITE_API_VARIANT") {
        config.content_api.variant = v;
    }
    if let Some(v) = get("NEXT_PUBLIC_WEBSITE_DOMAIN") {
        config.site.domain = Some(v);
    }
    if let Some(v) = get("RENDERER_UPSTREAM") {
        config.renderer.upstream = v;
    }
}

/// Resolve the listening port: `PORT`, then the positional startup argument,
/// then the configured port, then 3000.
pub fn resolve_port(env_port: Option<&str>, arg_port: Option<u16>, configured: u16) -> u16 {
    env_port
        .and_then(|p| p.trim().parse::<u16>().ok())
        .filter(|p| *p != 0)
        .or(arg_port.filter(|p| *p != 0))
        .or(Some(configured).filter(|p| *p != 0))
        .unwrap_or(DEFAULT_PORT)
}

/// Validate a configuration, folding the errors into a `ConfigError`.
pub fn ensure_valid(config: &GatewayConfig) -> Result<(), ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)
}
