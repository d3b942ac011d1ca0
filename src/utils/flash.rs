use axum::http::{header, HeaderMap, HeaderValue, Response};

use crate::utils::cookie::{build_clear_cookie, extract_cookie};

pub const FLASH_COOKIE: &str = "flash";

/// One-shot notice carried across a redirect in a short-lived cookie.
/// The category maps to a CSS class on the rendered notice.
#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub category: String,
    pub message: String,
}

impl Flash {
    pub fn new(category: &str, message: &str) -> Self {
        Self {
            category: category.to_string(),
            message: message.to_string(),
        }
    }

    pub fn encode(&self) -> String {
        format!(
            "{}:{}",
            urlencoding::encode(&self.category),
            urlencoding::encode(&self.message)
        )
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let (category, message) = raw.split_once(':')?;
        Some(Self {
            category: urlencoding::decode(category).ok()?.into_owned(),
            message: urlencoding::decode(message).ok()?.into_owned(),
        })
    }
}

/// Attach a flash cookie to an outgoing response (typically a redirect).
pub fn set_flash<B>(response: &mut Response<B>, flash: &Flash) {
    let cookie = format!(
        "{FLASH_COOKIE}={}; Path=/; Max-Age=60; HttpOnly; SameSite=Lax",
        flash.encode()
    );
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}

/// Read the pending flash notice from the incoming request, if any.
pub fn peek_flash(headers: &HeaderMap) -> Option<Flash> {
    extract_cookie(headers, FLASH_COOKIE).and_then(|raw| Flash::decode(&raw))
}

/// Clear the flash cookie so the notice shows only once.
pub fn clear_flash<B>(response: &mut Response<B>) {
    let cookie = build_clear_cookie(FLASH_COOKIE);
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}
