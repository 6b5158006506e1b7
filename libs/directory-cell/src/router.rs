// libs/directory-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn directory_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/public/services", get(handlers::get_all_services))
        .route("/public/outlets", get(handlers::get_all_outlets))
        .with_state(state)
}
