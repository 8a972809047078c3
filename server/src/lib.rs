//! Backend for the Quill blogging platform.
//!
//! Only the admin surface lives here for now: every route under `/api/admin`
//! passes through the [`guard`] before reaching its handler.
//!
//! # Setup
//!
//! ```sh
//! RUST_LOG=quill_server=debug RUST_PORT=4000 cargo run -p quill-server
//! ```
//!
//! | Variable               | Default                 |
//! |------------------------|-------------------------|
//! | `RUST_PORT`            | `4000`                  |
//! | `QUILL_ALLOWED_ORIGIN` | `http://localhost:5173` |
use std::{sync::Arc, time::Duration};

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method,
    },
    middleware::from_fn,
    routing::get,
    Router,
};
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod guard;
pub mod routes;
pub mod state;

use config::Config;
use error::AppError;
use guard::{require_admin, resolve_principal};
use routes::{health_handler, whoami_handler};
use state::State;

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60));

    let admin = Router::new()
        .route("/whoami", get(whoami_handler))
        .route_layer(from_fn(require_admin));

    Router::new()
        .route("/api/health", get(health_handler))
        .nest("/api/admin", admin)
        .layer(from_fn(resolve_principal))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<(), AppError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let state = State::new(Config::load()?);

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
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
