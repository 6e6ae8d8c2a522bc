mod admins;
pub mod auth;
mod error;
mod exhibitors;
mod validation;
mod visitors;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Admin account routes (signup and login are public)
    let admin_routes = Router::new()
        .route("/signup", post(admins::signup))
        .route("/login", post(admins::login))
        .merge(
            Router::new()
                .route("/profile", get(admins::profile))
                .route("/verify", get(admins::verify))
                .route("/all", get(admins::list_admins))
                .route("/logout", post(admins::logout))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::require_auth,
                )),
        );

    // Visitor routes: registration and number lookup are public,
    // listings and statistics need an admin token
    let visitor_routes = Router::new()
        .route("/register", post(visitors::register_visitor))
        .route("/:visitor_number", get(visitors::get_visitor))
        .merge(
            Router::new()
                .route("/", get(visitors::list_visitors))
                .route("/stats/overview", get(visitors::visitor_stats))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::require_admin,
                )),
        );

    let exhibitor_routes = Router::new()
        .route("/register", post(exhibitors::register_exhibitor))
        .route("/:exhibitor_number", get(exhibitors::get_exhibitor))
        .merge(
            Router::new()
                .route("/", get(exhibitors::list_exhibitors))
                .route("/hall/:hall_number", get(exhibitors::list_exhibitors_by_hall))
                .route("/stats/overview", get(exhibitors::exhibitor_stats))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth::require_admin,
                )),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/admin", admin_routes)
        .nest("/api/visitors", visitor_routes)
        .nest("/api/exhibitors", exhibitor_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
pub(crate) async fn test_state() -> Arc<AppState> {
    Arc::new(AppState {
        db: crate::db::test_pool().await,
        config: crate::config::Config::default(),
    })
}
