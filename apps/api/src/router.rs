use std::sync::Arc;

use axum::{routing::get, Router};

use booking_cell::router::booking_routes;
use directory_cell::router::directory_routes;
use notification_cell::router::notification_routes;
use scheduling_cell::router::scheduling_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    let api_routes = Router::new()
        .merge(booking_routes(state.clone()))
        .merge(scheduling_routes(state.clone()))
        .merge(directory_routes(state.clone()))
        .merge(notification_routes(state));

    Router::new()
        .route("/", get(|| async { "Vehicle Service Portal API is running!" }))
        .nest("/api", api_routes)
}
