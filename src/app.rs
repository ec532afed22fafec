use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/signup", post(handlers::signup))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/session", get(handlers::get_session))
        .route(
            "/api/activities",
            get(handlers::list_activities).post(handlers::add_activity),
        )
        .route("/api/activities/today", get(handlers::get_today))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/tips", get(handlers::get_tips))
        .route("/api/factors", get(handlers::get_factors))
        .route("/api/password-strength", post(handlers::check_password))
        .with_state(state)
}
