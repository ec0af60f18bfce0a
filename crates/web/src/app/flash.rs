//! One-shot flash messages carried in a cookie.
//!
//! A redirect sets the cookie; the next rendered page shows the message and
//! clears it. The value format is `kind:text` with spaces as `+` and the
//! text reduced to a cookie-safe ASCII subset; all messages are our own
//! short literals.

use axum::http::{header, HeaderMap, HeaderValue};
use serde::Serialize;

pub const COOKIE_NAME: &str = "bookshelf_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn as_str(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(FlashKind::Success),
            "error" => Some(FlashKind::Error),
            _ => None,
        }
    }
}

/// User-visible outcome message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            text: text.into(),
        }
    }
}

/// Read the flash cookie from the request headers, if any.
pub fn peek(headers: &HeaderMap) -> Option<Flash> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == COOKIE_NAME).then_some(value)
        })
        .find_map(decode)
}

/// `Set-Cookie` value carrying the flash to the next page.
pub fn set_cookie(flash: &Flash) -> HeaderValue {
    let raw = format!("{COOKIE_NAME}={}; Path=/; HttpOnly", encode(flash));
    // `encode` emits ASCII only, so this cannot fail in practice.
    HeaderValue::from_str(&raw).unwrap_or_else(|_| clear_cookie())
}

/// `Set-Cookie` value dropping a consumed flash.
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("bookshelf_flash=; Path=/; Max-Age=0; HttpOnly")
}

fn encode(flash: &Flash) -> String {
    let text: String = flash
        .text
        .chars()
        .map(|c| match c {
            ' ' => '+',
            c if c.is_ascii_alphanumeric() => c,
            '@' | '.' | '-' | '_' | '!' | '(' | ')' => c,
            _ => '_',
        })
        .collect();
    format!("{}:{text}", flash.kind.as_str())
}

fn decode(value: &str) -> Option<Flash> {
    let (kind, text) = value.split_once(':')?;
    Some(Flash {
        kind: FlashKind::parse(kind)?,
        text: text.replace('+', " "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn round_trips_through_the_cookie() {
        let flash = Flash::success("Author updated successfully!");
        let set = set_cookie(&flash);
        let pair = set.to_str().unwrap().split(';').next().unwrap().to_string();

        let read = peek(&headers_with_cookie(&pair)).unwrap();
        assert_eq!(read, flash);
    }

    #[test]
    fn finds_the_flash_among_other_cookies() {
        let headers =
            headers_with_cookie("session=abc123; bookshelf_flash=error:Author+not+found; theme=dark");
        let read = peek(&headers).unwrap();
        assert_eq!(read, Flash::error("Author not found"));
    }

    #[test]
    fn ignores_missing_or_mangled_cookies() {
        assert_eq!(peek(&HeaderMap::new()), None);
        assert_eq!(peek(&headers_with_cookie("bookshelf_flash=")), None);
        assert_eq!(peek(&headers_with_cookie("bookshelf_flash=weird:thing")), None);
        assert_eq!(peek(&headers_with_cookie("other=success:hi")), None);
    }

    #[test]
    fn hostile_characters_are_neutralized() {
        let flash = Flash::error("bad; value=\r\ninjection");
        let set = set_cookie(&flash);
        let raw = set.to_str().unwrap();
        assert!(!raw.contains('\r'));
        assert!(!raw.contains("value="));
    }
}
