use std::env;

#[derive(Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_tls: bool,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    pub app_url: String,
    pub send_timeout_secs: u64,
}

impl EmailConfig {
    /// Read mail config from environment variables.
    /// Returns None if SMTP is not configured (graceful degradation).
    pub fn from_env() -> Option<Self> {
        let smtp_host = env::var("SMTP_HOST").ok()?;
        let smtp_port = env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);
        let smtp_tls = env::var("SMTP_TLS")
            .ok()
            .and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "y" | "on" => Some(true),
                "0" | "false" | "no" | "n" | "off" => Some(false),
                _ => None,
            })
            .unwrap_or(true);
        let smtp_username = env::var("SMTP_USERNAME").ok()?;
        let smtp_password = env::var("SMTP_PASSWORD").ok()?;
        let from_address =
            env::var("SMTP_FROM").unwrap_or_else(|_| format!("Inklet <{}>", smtp_username.clone()));
        let app_url = app_url_from_env();
        let send_timeout_secs = env::var("SMTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Some(Self {
            smtp_host,
            smtp_port,
            smtp_tls,
            smtp_username,
            smtp_password,
            from_address,
            app_url,
            send_timeout_secs,
        })
    }
}

pub fn app_url_from_env() -> String {
    env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
