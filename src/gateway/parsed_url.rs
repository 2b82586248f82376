//! Structured view of the request URL.

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

/// The request URL split into its parts, with the `Host` header overlaid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedUrl {
    pub scheme: Option<String>,
    /// `Host` header value (including any port) when present.
    pub host: Option<String>,
    /// `host` without the listening port suffix.
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub pathname: Option<String>,
    /// Raw query string including the leading `?`.
    pub search: Option<String>,
    /// Decoded query parameters. Repeated keys become arrays.
    pub query: Map<String, Value>,
    /// The raw request target.
    pub href: String,
}

impl ParsedUrl {
    /// Parse `target`, then overlay `host_header`. `listen_port` is stripped
    /// from the header to produce `hostname`.
    pub fn parse(target: Option<&str>, host_header: Option<&str>, listen_port: u16) -> Self {
        let mut parsed = match target {
            Some(raw) => Self::parse_target(raw),
            None => Self::default(),
        };

        if let Some(host) = host_header.filter(|h| !h.is_empty()) {
            parsed.host = Some(host.to_string());
            parsed.hostname = Some(host.replacen(&format!(":{listen_port}"), "", 1));
        }

        parsed
    }

    fn parse_target(raw: &str) -> Self {
        if let Ok(url) = Url::parse(raw) {
            let host = url.host_str().map(|h| match url.port() {
                Some(port) => format!("{h}:{port}"),
                None => h.to_string(),
            });
            return Self {
                scheme: Some(url.scheme().to_string()),
                hostname: url.host_str().map(str::to_string),
                host,
                port: url.port(),
                pathname: Some(url.path().to_string()),
                search: url.query().map(|q| format!("?{q}")),
                query: parse_query(url.query().unwrap_or_default()),
                href: raw.to_string(),
            };
        }

        let without_fragment = raw.split('#').next().unwrap_or_default();
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (without_fragment, None),
        };

        Self {
            pathname: Some(path.to_string()).filter(|p| !p.is_empty()),
            search: query.map(|q| format!("?{q}")),
            query: parse_query(query.unwrap_or_default()),
            href: raw.to_string(),
            ..Self::default()
        }
    }
}

/// Decode `a=1&b=2&a=3` into `{"a": ["1", "3"], "b": "2"}`.
pub fn parse_query(query: &str) -> Map<String, Value> {
    let mut map = Map::new();

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let value = Value::String(value.into_owned());
        match map.get_mut(key.as_ref()) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(key.into_owned(), value);
            }
        }
    }

    map
}
