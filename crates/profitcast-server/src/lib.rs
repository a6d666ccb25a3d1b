//! axum HTTP layer for the profit prediction service.
//!
//! One set of handlers, two thin mounts: the Root variant serves `/`,
//! `/health` and `/predict`; the Api variant serves the same health and
//! predict handlers under an `/api` prefix for the hosted deployment.

mod config;
mod error;
mod routes;

pub use config::{Config, Mount};
pub use error::ApiError;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use profitcast_model::Predictor;
use tower_http::cors::{Any, CorsLayer};

/// Shared request-handling state. Built once before the listener binds and
/// read-only afterwards, so concurrent requests need no coordination.
pub struct AppState {
    /// `None` when artifact loading failed at startup: the process stays
    /// live but answers every predict with `not_ready`. There is no reload
    /// path.
    pub predictor: Option<Predictor>,
}

/// Build the service router for the given mount variant.
///
/// CORS is wide open (any origin, method, header); the service fronts a
/// browser client on a different origin and carries no credentials.
pub fn router(mount: Mount, state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let core = Router::new()
        .route("/health", get(routes::health))
        .route("/predict", post(routes::predict));

    let app = match mount {
        Mount::Root => core.route("/", get(routes::index)),
        Mount::Api => Router::new().nest("/api", core),
    };

    app.layer(cors).with_state(state)
}
