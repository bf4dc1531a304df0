//! HTTP surface of the numbers fact API.
//!
//! Four fact families (math, trivia, years, dates) each expose a keyed
//! lookup, a random lookup and a like endpoint under `/api`; the root serves
//! rendered API documentation. Date lookups translate month/day to the
//! stored day-ordinal through the calendar codec, and codec rejections pass
//! through to clients as 400s with the codec's message text.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    middleware,
    routing::{get, post},
    Router,
};
use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod docs;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod state;

use config::Config;
use state::AppState;

/// Builds the full router. Public so integration tests can drive it without
/// binding a socket.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/api/math/{number}", get(routes::math::fact))
        .route("/api/math/random", get(routes::math::random))
        .route("/api/math/like/{id}", post(routes::math::like))
        .route("/api/trivia/{number}", get(routes::trivia::fact))
        .route("/api/trivia/random", get(routes::trivia::random))
        .route("/api/trivia/like/{id}", post(routes::trivia::like))
        .route("/api/years/{year}", get(routes::years::fact))
        .route("/api/years/random", get(routes::years::random))
        .route("/api/years/like/{id}", post(routes::years::like))
        .route("/api/dates/{month}/{day}", get(routes::dates::fact))
        .route("/api/dates/random", get(routes::dates::random))
        .route("/api/dates/like/{id}", post(routes::dates::like))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit,
        ));

    Router::new()
        .route("/", get(docs::docs_handler))
        .merge(api)
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let config = Config::load();
    let state = AppState::new(config).expect("Failed to open fact store");

    info!("Starting server...");
    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
