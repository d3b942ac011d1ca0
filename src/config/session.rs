use std::env;

/// Session lifetimes. The "remember me" box on the login form switches from
/// the short default to the extended duration.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub ttl_hours: i64,
    pub remember_days: i64,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let ttl_hours = env::var("SESSION_TTL_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(24);

        let remember_days = env::var("SESSION_REMEMBER_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Self {
            ttl_hours,
            remember_days,
        }
    }

    pub fn lifetime(&self, remember: bool) -> chrono::Duration {
        if remember {
            chrono::Duration::days(self.remember_days)
        } else {
            chrono::Duration::hours(self.ttl_hours)
        }
    }
}
