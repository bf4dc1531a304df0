use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    /// Requests allowed per client per window on the /api routes.
    pub rate_limit_requests: u32,
    pub rate_limit_window_secs: u64,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("NUMS_PORT", "3000"),
            database_path: try_load("NUMS_DATABASE", "facts.db"),
            // The original deployment allowed 200 requests per day per client.
            rate_limit_requests: try_load("NUMS_RATE_LIMIT", "200"),
            rate_limit_window_secs: try_load("NUMS_RATE_LIMIT_WINDOW_SECS", "86400"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
