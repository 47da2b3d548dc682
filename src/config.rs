use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PROPOSALS_URL: &str =
    "https://suggestionportal100-sandbox.mxapps.io/rest/myservice/v1/project";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_APP_NAME: &str = "Suggestion Portal";

/// Minimum length `actix_web::cookie::Key::from` accepts.
const SESSION_KEY_MIN_LEN: usize = 64;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub proposals_url: String,
    pub decisions_base_url: String,
    pub request_timeout: Duration,
    pub app_name: String,
    pub session_key: Option<String>,
}

impl AppConfig {
    /// Load `.env` (if present) and read settings from the process environment.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let proposals_url =
            non_empty("PORTAL_PROPOSALS_URL").unwrap_or_else(|| DEFAULT_PROPOSALS_URL.to_string());
        let decisions_base_url = non_empty("PORTAL_DECISIONS_BASE_URL")
            .unwrap_or_else(|| origin_of(&proposals_url));

        let timeout_secs = match non_empty("PORTAL_REQUEST_TIMEOUT_SECS").map(|v| v.parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => secs,
            Some(_) => {
                log::warn!(
                    "Invalid PORTAL_REQUEST_TIMEOUT_SECS, using {DEFAULT_TIMEOUT_SECS}s"
                );
                DEFAULT_TIMEOUT_SECS
            }
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            bind_addr: non_empty("PORTAL_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            proposals_url,
            decisions_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            app_name: non_empty("PORTAL_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            session_key: lookup("SESSION_KEY"),
        }
    }

    /// Session encryption key. A missing or short `SESSION_KEY` yields a random
    /// key, so sessions do not survive a restart.
    pub fn cookie_key(&self) -> actix_web::cookie::Key {
        use actix_web::cookie::Key;

        match &self.session_key {
            Some(val) if val.len() >= SESSION_KEY_MIN_LEN => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {SESSION_KEY_MIN_LEN}+), generating random key",
                    val.len()
                );
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

/// Scheme, host and port of `url`; the URL itself when it has no usable origin.
fn origin_of(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => {
            let origin = parsed.origin();
            if origin.is_tuple() {
                origin.ascii_serialization()
            } else {
                url.to_string()
            }
        }
        Err(_) => url.to_string(),
    }
}
