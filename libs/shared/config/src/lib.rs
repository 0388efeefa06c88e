use std::env;
use tracing::warn;

pub mod endpoints;

/// Default origin of the hosted portal API.
pub const DEFAULT_BASE_URL: &str = "https://hc-acesso-facil.onrender.com";
/// Per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Total attempts per request, first try included.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Fixed delay between attempts in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2_000;

/// Immutable client configuration, built once at startup and passed into
/// every service constructor.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl PortalConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("PORTAL_API_BASE_URL").unwrap_or_else(|_| {
                warn!("PORTAL_API_BASE_URL not set, using default");
                DEFAULT_BASE_URL.to_string()
            }),
            timeout_ms: env_u64("PORTAL_API_TIMEOUT_MS", DEFAULT_TIMEOUT_MS),
            max_retries: env_u64("PORTAL_API_MAX_RETRIES", DEFAULT_MAX_RETRIES as u64) as u32,
            retry_delay_ms: env_u64("PORTAL_API_RETRY_DELAY_MS", DEFAULT_RETRY_DELAY_MS),
        }
    }

    /// Configuration pointed at a specific origin, keeping default timing.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} is not a number ({:?}), using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
