//! One-shot messages carried across a redirect
//!
//! A successful form submission answers with a redirect and stores its
//! message in the `flash` cookie. The page rendered next shows the message
//! and expires the cookie.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::Serialize;

pub const FLASH_COOKIE: &str = "flash";

/// `Set-Cookie` value that removes a displayed flash message
pub const CLEAR_FLASH_COOKIE: &str = "flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(FlashLevel::Success),
            "error" => Some(FlashLevel::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// Encode as a `Set-Cookie` header value
    ///
    /// The message is percent-encoded so the value stays within the cookie
    /// character set.
    pub fn to_set_cookie(&self) -> String {
        format!(
            "{}={}:{}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            self.level.as_str(),
            utf8_percent_encode(&self.message, NON_ALPHANUMERIC)
        )
    }

    /// Decode a cookie value produced by [`Flash::to_set_cookie`]
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let (level, message) = value.split_once(':')?;
        let level = FlashLevel::parse(level)?;
        let message = percent_decode_str(message).decode_utf8().ok()?;
        Some(Self {
            level,
            message: message.into_owned(),
        })
    }

    /// Read the pending flash message from the request's `Cookie` headers
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        cookie_value(headers).and_then(Self::from_cookie_value)
    }

    /// Whether the request carries a `flash` cookie, decodable or not
    pub fn is_pending(headers: &HeaderMap) -> bool {
        cookie_value(headers).is_some()
    }
}

fn cookie_value(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == FLASH_COOKIE)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_set_cookie_encodes_message() {
        let cookie = Flash::success("The list has been created.").to_set_cookie();
        assert!(cookie.starts_with("flash=success:The%20list%20has%20been%20created%2E;"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn test_flash_read_from_cookie_header() {
        let flash = Flash::error("The list name must be unique.");
        let cookie = flash.to_set_cookie();
        let pair = cookie.split(';').next().unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}", pair)).unwrap(),
        );

        assert_eq!(Flash::from_headers(&headers), Some(flash));
    }

    #[test]
    fn test_missing_or_malformed_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        assert_eq!(Flash::from_headers(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("flash=warning:hello"));
        assert_eq!(Flash::from_headers(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("flash="));
        assert_eq!(Flash::from_headers(&headers), None);
    }

    #[test]
    fn test_malformed_cookie_is_still_pending() {
        let mut headers = HeaderMap::new();
        assert!(!Flash::is_pending(&headers));

        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(!Flash::is_pending(&headers));

        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; flash=warning:x"));
        assert!(Flash::is_pending(&headers));
        assert_eq!(Flash::from_headers(&headers), None);
    }
}
