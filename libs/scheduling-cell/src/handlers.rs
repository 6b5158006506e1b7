// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::SchedulingError;
use crate::services::timeslot::TimeSlotService;

#[derive(Debug, Deserialize)]
pub struct AvailableSlotsQuery {
    pub year: i16,
    pub month: i16,
    pub day: i16,
    pub outlet_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct TimeSlotsQuery {
    pub year: i16,
    pub month: i16,
    pub day: i16,
}

fn map_scheduling_error(e: SchedulingError) -> AppError {
    match e {
        SchedulingError::TimeSlotNotFound => AppError::NotFound("Time slot not found".to_string()),
        SchedulingError::Database(e) => AppError::Database(e.to_string()),
    }
}

#[axum::debug_handler]
pub async fn get_available_time_slots(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let service = TimeSlotService::new(&state);

    let slots = service
        .get_available_time_slots(query.year, query.month, query.day, query.outlet_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "time_slots": slots
    })))
}

#[axum::debug_handler]
pub async fn get_time_slots_for_date(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<TimeSlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let service = TimeSlotService::new(&state);

    let slots = service
        .get_time_slots_for_date(query.year, query.month, query.day)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "time_slots": slots
    })))
}
