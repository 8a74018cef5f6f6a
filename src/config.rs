use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub catalog_path: Option<String>,
    pub currency: String,
    pub session_idle_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            catalog_path: env::var("CATALOG_PATH").ok().filter(|p| !p.trim().is_empty()),
            currency: env::var("CURRENCY").unwrap_or_else(|_| "RM".to_string()),
            session_idle_minutes: env::var("SESSION_IDLE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|m: &i64| *m > 0)
                .unwrap_or(30),
        }
    }
}
