// libs/notification-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn notification_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/notifications", get(handlers::get_notifications))
        .route(
            "/notifications/unread",
            get(handlers::get_unread_notifications),
        )
        .route(
            "/notifications/{notification_id}/read",
            put(handlers::mark_notification_read),
        )
        .route(
            "/notifications/read-all",
            put(handlers::mark_all_notifications_read),
        )
        .with_state(state)
}
