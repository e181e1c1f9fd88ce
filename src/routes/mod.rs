pub mod forms;

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use serde_json::json;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/forms/get-started", post(forms::get_started))
        .route("/api/forms/contact", post(forms::contact))
        .route(
            "/api/forms/lender-partnership",
            post(forms::lender_partnership),
        )
}

async fn health(State(state): State<SharedState>) -> axum::Json<serde_json::Value> {
    axum::Json(json!({
        "status": "healthy",
        "environment": state.config.environment,
    }))
}
