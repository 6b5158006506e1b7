// libs/notification-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::services::notify::NotificationService;

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    pub user_id: i32,
    pub user_type: String,
}

#[axum::debug_handler]
pub async fn get_notifications(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Value>, AppError> {
    let service = NotificationService::new(&state);

    let notifications = service
        .get_user_notifications(query.user_id, &query.user_type)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "notifications": notifications
    })))
}

#[axum::debug_handler]
pub async fn get_unread_notifications(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Value>, AppError> {
    let service = NotificationService::new(&state);

    let notifications = service
        .get_unread_notifications(query.user_id, &query.user_type)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "notifications": notifications
    })))
}

#[axum::debug_handler]
pub async fn mark_notification_read(
    State(state): State<Arc<AppConfig>>,
    Path(notification_id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let service = NotificationService::new(&state);

    service
        .mark_as_read(notification_id)
        .await
        .map_err(|e| AppError::NotFound(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Notification marked as read"
    })))
}

#[axum::debug_handler]
pub async fn mark_all_notifications_read(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Value>, AppError> {
    let service = NotificationService::new(&state);

    let updated = service
        .mark_all_as_read(query.user_id, &query.user_type)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "updated": updated
    })))
}
