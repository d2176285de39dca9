//! Server configuration from environment variables

use std::env;

/// Frontend origins allowed by default.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://finanalyses.pages.dev",
    "http://localhost:8080",
    "http://127.0.0.1:8080",
    "http://localhost:5500",
    "http://127.0.0.1:5500",
];

/// Configuration derived from environment variables (optionally loaded
/// from a `.env` file before startup).
///
/// API keys are optional: a missing key disables the corresponding
/// feature (which then answers 503) instead of failing startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,

    /// Gemini key; absent ⇒ chat and analysis comments disabled.
    pub google_api_key: Option<String>,
    /// Financial Modeling Prep key; absent ⇒ fundamentals, screener,
    /// search, movers and calendar disabled.
    pub fmp_api_key: Option<String>,
    /// Marketaux key; absent ⇒ news disabled.
    pub marketaux_api_key: Option<String>,

    /// Outbound requests per minute against FMP.
    pub fmp_rate_limit: u32,
    /// Outbound requests per minute against Marketaux.
    pub marketaux_rate_limit: u32,

    /// Chat session inactivity TTL, seconds.
    pub session_ttl_secs: i64,
    /// Maximum concurrently tracked chat sessions.
    pub session_capacity: usize,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_i64(name: &str, default: i64) -> i64 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let allowed_origins = match env_opt("FINANALYSE_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        };

        Self {
            bind: env_str("FINANALYSE_BIND", "0.0.0.0"),
            port: env_u16("FINANALYSE_PORT", 8000),
            allowed_origins,
            google_api_key: env_opt("GOOGLE_API_KEY"),
            fmp_api_key: env_opt("FMP_API_KEY"),
            marketaux_api_key: env_opt("MARKETAUX_API_KEY"),
            fmp_rate_limit: env_u32("FINANALYSE_FMP_RATE_LIMIT", 60),
            marketaux_rate_limit: env_u32("FINANALYSE_MARKETAUX_RATE_LIMIT", 60),
            session_ttl_secs: env_i64("FINANALYSE_SESSION_TTL_SECS", 1800),
            session_capacity: env_usize("FINANALYSE_SESSION_CAPACITY", 1000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        // Helpers fall back when the variable is absent.
        assert_eq!(env_str("FINANALYSE_TEST_UNSET_STR", "fallback"), "fallback");
        assert_eq!(env_opt("FINANALYSE_TEST_UNSET_OPT"), None);
        assert_eq!(env_u16("FINANALYSE_TEST_UNSET_U16", 8000), 8000);
        assert_eq!(env_i64("FINANALYSE_TEST_UNSET_I64", 1800), 1800);
    }

    #[test]
    fn test_default_origins_include_local_dev() {
        assert!(DEFAULT_ALLOWED_ORIGINS.contains(&"http://localhost:8080"));
        assert!(DEFAULT_ALLOWED_ORIGINS.contains(&"https://finanalyses.pages.dev"));
    }
}
