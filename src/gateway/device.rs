//! Mobile client detection.
//!
//! An accelerator-provided device type header is authoritative. Without it the
//! user agent is matched against known mobile signatures.

use std::sync::LazyLock;

use axum::http::HeaderMap;
use regex::Regex;

/// Device type set by the edge accelerator.
pub const DEVICE_TYPE_HEADER: &str = "x-oa-device-type";

static MOBILE_UA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(android|bb\d+|meego).+mobile|armv7l|avantgo|bada/|blackberry|blazer|compal|elaine|fennec|hiptop|iemobile|ip(hone|od)|iris|kindle|lge |maemo|midp|mmp|mobile.+firefox|netfront|opera m(ob|in)i|palm( os)?|phone|p(ixi|re)/|plucker|pocket|psp|series[46]0|samsungbrowser|symbian|treo|up\.(browser|link)|vodafone|wap|windows (ce|phone)|xda|xiino",
    )
    .expect("MOBILE_UA regex pattern is valid")
});

// Chromebooks announce themselves with mobile tokens.
static NOT_MOBILE_UA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CrOS").expect("NOT_MOBILE_UA regex pattern is valid"));

/// Device classes reported in `X-OA-Device-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Mobile,
    MobileBot,
    Tablet,
    Desktop,
    Bot,
    FacebookBot,
    Unknown,
}

impl DeviceType {
    pub fn from_header(value: &str) -> Self {
        match value {
            "mobile" => DeviceType::Mobile,
            "mobile-bot" => DeviceType::MobileBot,
            "tablet" => DeviceType::Tablet,
            "desktop" => DeviceType::Desktop,
            "bot" => DeviceType::Bot,
            "facebook-bot" => DeviceType::FacebookBot,
            _ => DeviceType::Unknown,
        }
    }

    pub fn is_mobile(self) -> bool {
        match self {
            DeviceType::Mobile | DeviceType::MobileBot => true,
            DeviceType::Tablet
            | DeviceType::Desktop
            | DeviceType::Bot
            | DeviceType::FacebookBot
            | DeviceType::Unknown => false,
        }
    }
}

/// Whether `user_agent` looks like a phone.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_UA.is_match(user_agent) && !NOT_MOBILE_UA.is_match(user_agent)
}

/// Whether the request comes from a mobile client.
pub fn is_mobile_client(headers: &HeaderMap) -> bool {
    if let Some(device_type) = headers.get(DEVICE_TYPE_HEADER).filter(|v| !v.is_empty()) {
        let device_type = match device_type.to_str() {
            Ok(value) => DeviceType::from_header(value),
            Err(_) => DeviceType::Unknown,
        };
        return device_type.is_mobile();
    }

    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_mobile_user_agent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const ANDROID: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
    const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const CHROMEBOOK: &str = "Mozilla/5.0 (X11; CrOS armv7l 13597.84.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for &(name, value) in pairs {
            map.insert(name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_device_header_is_authoritative() {
        assert!(is_mobile_client(&headers(&[(DEVICE_TYPE_HEADER, "mobile"), ("user-agent", DESKTOP)])));
        assert!(is_mobile_client(&headers(&[(DEVICE_TYPE_HEADER, "mobile-bot")])));
        for other in ["tablet", "desktop", "bot", "facebook-bot", "smart-fridge"] {
            assert!(
                !is_mobile_client(&headers(&[(DEVICE_TYPE_HEADER, other), ("user-agent", IPHONE)])),
                "{other}"
            );
        }
    }

    #[test]
    fn test_opaque_device_header_is_not_mobile() {
        let mut map = headers(&[("user-agent", IPHONE)]);
        map.insert(DEVICE_TYPE_HEADER, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        assert!(!is_mobile_client(&map));
    }

    #[test]
    fn test_empty_device_header_falls_back() {
        assert!(is_mobile_client(&headers(&[(DEVICE_TYPE_HEADER, ""), ("user-agent", IPHONE)])));
    }

    #[test]
    fn test_user_agent_fallback() {
        assert!(is_mobile_client(&headers(&[("user-agent", IPHONE)])));
        assert!(is_mobile_client(&headers(&[("user-agent", ANDROID)])));
        assert!(!is_mobile_client(&headers(&[("user-agent", DESKTOP)])));
        assert!(!is_mobile_client(&headers(&[("user-agent", CHROMEBOOK)])));
    }

    #[test]
    fn test_no_hints() {
        assert!(!is_mobile_client(&HeaderMap::new()));
    }
}
