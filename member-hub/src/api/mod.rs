//! API routes for member-hub

pub mod health;
pub mod member;

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::auth::app_auth_middleware;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Member management (application JWT)
    let members = Router::new()
        .route(
            "/api/apps/{app_id}/members/import",
            post(member::import_members),
        )
        .route(
            "/api/apps/{app_id}/members/{member_id}/tasks",
            get(member::list_member_tasks),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            app_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(members)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
