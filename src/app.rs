use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/view", get(handlers::get_view))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/overlay/open", post(handlers::open_overlay))
        .route("/api/overlay/close", post(handlers::close_overlay))
        .route("/api/select", post(handlers::select_status))
        .route("/api/bonus/marker", post(handlers::toggle_marker))
        .route("/api/bonus/confirm", post(handlers::confirm_bonus))
        .route("/api/navigate", post(handlers::navigate))
        .with_state(state)
}
