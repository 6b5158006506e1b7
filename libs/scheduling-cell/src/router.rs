// libs/scheduling-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn scheduling_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/public/available-timeslots",
            get(handlers::get_available_time_slots),
        )
        .route("/public/timeslots", get(handlers::get_time_slots_for_date))
        .with_state(state)
}
