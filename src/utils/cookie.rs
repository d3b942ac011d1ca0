use axum::http::{header, HeaderMap};
use std::{env, sync::OnceLock};

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone)]
struct SessionCookieConfig {
    secure: bool,
    same_site: &'static str,
}

impl SessionCookieConfig {
    fn from_env() -> Self {
        let same_site = parse_same_site(
            &env::var("SESSION_COOKIE_SAMESITE").unwrap_or_else(|_| "Lax".to_string()),
        );
        let mut secure = parse_bool_env("SESSION_COOKIE_SECURE", false);

        // Browsers require SameSite=None cookies to also be Secure.
        if same_site == "None" {
            secure = true;
        }

        Self { secure, same_site }
    }
}

fn session_cookie_config() -> &'static SessionCookieConfig {
    static CONFIG: OnceLock<SessionCookieConfig> = OnceLock::new();
    CONFIG.get_or_init(SessionCookieConfig::from_env)
}

fn parse_bool_env(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .and_then(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" | "on" => Some(true),
            "0" | "false" | "no" | "n" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn parse_same_site(value: &str) -> &'static str {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => "Strict",
        "none" => "None",
        _ => "Lax",
    }
}

pub fn build_session_cookie(value: &str, max_age_seconds: i64) -> String {
    let config = session_cookie_config();
    let mut cookie = format!(
        "{SESSION_COOKIE}={value}; Path=/; Max-Age={max_age_seconds}; HttpOnly; SameSite={}",
        config.same_site
    );

    if config.secure {
        cookie.push_str("; Secure");
    }

    cookie
}

pub fn build_clear_cookie(name: &str) -> String {
    let config = session_cookie_config();
    let mut cookie = format!(
        "{name}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite={}",
        config.same_site
    );

    if config.secure {
        cookie.push_str("; Secure");
    }

    cookie
}

pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie_header| {
            cookie_header.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                let key = parts.next()?.trim();
                let value = parts.next()?.trim();
                if key == name {
                    Some(value.to_string())
                } else {
                    None
                }
            })
        })
}
