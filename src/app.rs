use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/habits", get(handlers::list_habits).post(handlers::create_habit))
        .route(
            "/api/habits/:id",
            get(handlers::get_habit)
                .put(handlers::update_habit)
                .delete(handlers::delete_habit),
        )
        .route("/api/habits/:id/toggle", post(handlers::toggle_day))
        .route("/api/habits/:id/grid", get(handlers::get_grid))
        .route("/api/habits/:id/stats", get(handlers::get_stats))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/navigate", get(handlers::navigate))
        .route("/api/palette", get(handlers::palette))
        .with_state(state)
}
