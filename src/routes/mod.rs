use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod contact;
pub mod doc;
pub mod extract;
pub mod health;
pub mod params;
pub mod reservations;
pub mod reviews;
pub mod rooms;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/rooms", rooms::router())
        .nest("/auth", auth::router())
        .nest("/reservations", reservations::router())
        .nest("/reviews", reviews::router())
        .nest("/contact", contact::router())
        .nest("/admin", admin::router())
}
