pub mod profile;
pub mod session;

use axum::routing::{post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Session
        .route(
            "/api/v1/session",
            post(session::login)
                .get(session::current)
                .delete(session::logout),
        )
        .route("/api/v1/session/refresh", post(session::refresh))
        // Profile
        .route("/api/v1/profile/password", put(profile::change_password))
        .route(
            "/api/v1/profile/photo",
            put(profile::replace_photo).delete(profile::remove_photo),
        )
}
