use std::{sync::Arc, time::Duration};

use store::{FactStore, StoreError};

use super::{config::Config, rate_limit::RateLimiter};

pub struct AppState {
    pub config: Config,
    pub store: FactStore,
    pub limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>, StoreError> {
        let store = FactStore::open(&config.database_path)?;

        Ok(Self::with_store(config, store))
    }

    /// Builds state around an existing store, used by tests with an
    /// in-memory database.
    pub fn with_store(config: Config, store: FactStore) -> Arc<Self> {
        let limiter = RateLimiter::new(
            config.rate_limit_requests,
            Duration::from_secs(config.rate_limit_window_secs),
        );

        Arc::new(Self {
            config,
            store,
            limiter,
        })
    }
}
