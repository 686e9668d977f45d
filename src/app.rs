use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/mood", post(handlers::form_add_mood))
        .route("/mood/clear", post(handlers::form_clear_moods))
        .route("/mood/:index/delete", post(handlers::form_delete_mood))
        .route("/click", post(handlers::form_click))
        .route(
            "/api/moods",
            get(handlers::list_moods)
                .post(handlers::add_mood)
                .delete(handlers::clear_moods),
        )
        .route("/api/moods/export", get(handlers::export_moods))
        .route("/api/moods/:index", delete(handlers::delete_mood))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/clicks", get(handlers::get_clicks))
        .route("/api/click", post(handlers::click))
        .with_state(state)
}
