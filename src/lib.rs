pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod profile;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod upload;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::profile::ProfileService;
use crate::state::{AppState, SharedState};

/// Room for multipart boundaries and headers around the photo itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_app(profiles: ProfileService, max_photo_size: usize) -> Router {
    let state: SharedState = Arc::new(AppState {
        profiles,
        max_photo_size,
    });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_photo_size + MULTIPART_OVERHEAD))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
