use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context};

/// Connection details for the hosted auth/data provider.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub url: String,
    pub anon_key: String,
    pub jwt_secret: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub provider: Option<ProviderConfig>,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub session_cache_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. A missing provider
    /// section is tolerated; the routes that need it answer with a configuration error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| lookup(key).filter(|value| !value.trim().is_empty()))
        };

        let url = first(&["NEXT_PUBLIC_SUPABASE_URL", "SUPABASE_URL"]);
        let anon_key = first(&["NEXT_PUBLIC_SUPABASE_ANON_KEY", "SUPABASE_ANON_KEY"]);

        let provider = match (url, anon_key) {
            (Some(url), Some(anon_key)) => Some(ProviderConfig {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
                jwt_secret: first(&["SUPABASE_JWT_SECRET"]),
            }),
            _ => None,
        };

        let host = first(&["HOST"]).unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match first(&["PORT"]) {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {}", port))?,
            None => 8080,
        };

        let log_level = first(&["RUST_LOG"]).unwrap_or_else(|| "info".to_string());

        let session_cache_ttl = match first(&["SESSION_CACHE_TTL_SECS"]) {
            Some(secs) => Duration::from_secs(
                secs.parse::<u64>()
                    .map_err(|_| anyhow!("SESSION_CACHE_TTL_SECS must be a number of seconds"))?,
            ),
            None => Duration::from_secs(60),
        };

        Ok(AppConfig {
            provider,
            host,
            port,
            log_level,
            session_cache_ttl,
        })
    }
}
