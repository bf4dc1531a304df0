//! Fixed-window request limiter keyed by client IP.
//!
//! Counts reset when a full window has elapsed since the client's window
//! opened. State lives in the limiter itself and limits come from `Config`,
//! so nothing here is process-global.

use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::ApiError, state::AppState};

pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

struct Window {
    opened_at: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Records a request for `client` and reports whether it is allowed.
    pub fn try_acquire(&self, client: IpAddr) -> bool {
        self.try_acquire_at(client, Instant::now())
    }

    fn try_acquire_at(&self, client: IpAddr, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap();

        // Elapsed windows are dropped rather than reset in place, so the map
        // only tracks clients seen within the current window and cannot grow
        // without bound across unique addresses.
        windows.retain(|_, window| now.duration_since(window.opened_at) < self.window);

        let window = windows.entry(client).or_insert(Window {
            opened_at: now,
            count: 0,
        });

        if window.count >= self.max_requests {
            return false;
        }

        window.count += 1;
        true
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.windows.lock().unwrap().len()
    }
}

/// Axum middleware applied to the /api routes. The docs root stays exempt.
pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Router tests run without a socket; they all share the fallback key.
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or(IpAddr::V4(Ipv4Addr::LOCALHOST), |info| info.0.ip());

    if !state.limiter.try_acquire(client) {
        return Err(ApiError::TooManyRequests);
    }

    Ok(next.run(request).await)
}
