// libs/directory-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::services::catalog::{OutletDirectory, ServiceCatalog};

#[axum::debug_handler]
pub async fn get_all_services(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let catalog = ServiceCatalog::new(&state);

    let services = catalog
        .find_all()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "services": services
    })))
}

#[axum::debug_handler]
pub async fn get_all_outlets(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let outlets = OutletDirectory::new(&state)
        .find_all()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "outlets": outlets
    })))
}
