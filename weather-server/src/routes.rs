//! Route definitions

use axum::{
    Router,
    routing::{delete, get},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::meta::root))
        .route("/api", get(handlers::meta::api_index))
        .route("/api/health", get(handlers::meta::health))
        // Weather
        .route("/api/canada-summary", get(handlers::weather::canada_summary))
        .route("/api/details-data/{city}", get(handlers::weather::city_details))
        // Air quality
        .route("/api/ontario-aqhi", get(handlers::air_quality::ontario_aqhi))
        .route("/api/ontario-records", get(handlers::air_quality::ontario_records))
        // Message board
        .route(
            "/api/messages",
            get(handlers::messages::list_messages).post(handlers::messages::create_message),
        )
        .route("/api/messages/{id}", delete(handlers::messages::delete_message))
        .fallback(handlers::meta::not_found)
        .with_state(state)
}
