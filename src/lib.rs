pub mod config;
pub mod error;
pub mod forms;
pub mod recaptcha;
pub mod routes;
pub mod sheets;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::recaptcha::RecaptchaVerifier;
use crate::sheets::SheetsStore;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config) -> Router {
    let cors = cors_layer(&config);

    let state: SharedState = Arc::new(AppState {
        recaptcha: RecaptchaVerifier::new(&config),
        sheets: SheetsStore::new(&config),
        config,
    });

    routes::api_routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
