// libs/booking-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{BookAppointmentRequest, BookingError, ConfirmAppointmentRequest, UpdateStatusRequest};
use crate::services::booking::BookingService;
use crate::services::lifecycle::AppointmentLifecycleService;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct CustomerAppointmentsQuery {
    pub cust_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct StaffAppointmentsQuery {
    pub staff_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct StaffScheduleQuery {
    pub staff_id: i32,
    /// YYYY-MM-DD
    pub date: String,
}

fn map_booking_error(e: BookingError) -> AppError {
    match e {
        BookingError::AppointmentNotFound
        | BookingError::CustomerNotFound
        | BookingError::VehicleNotFound
        | BookingError::ServiceNotFound
        | BookingError::OutletNotFound
        | BookingError::StaffNotFound(_)
        | BookingError::TimeSlotNotFound => AppError::NotFound(e.to_string()),
        BookingError::MissingTimeSlot => AppError::ValidationError(e.to_string()),
        BookingError::InvalidStatusTransition(_) | BookingError::InvalidFinishTime => {
            AppError::BadRequest(e.to_string())
        }
        BookingError::Scheduling(e) => AppError::Database(e.to_string()),
        BookingError::Database(e) => AppError::Database(e.to_string()),
    }
}

// ==============================================================================
// CUSTOMER HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let appointment = booking_service
        .create_appointment(request)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment created successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_customer_appointments(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<CustomerAppointmentsQuery>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let appointments = booking_service
        .get_customer_appointments(query.cust_id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn get_appointment_details(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let appointment = booking_service
        .get_appointment(appointment_id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment
    })))
}

// ==============================================================================
// STAFF HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_staff_appointments(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<StaffAppointmentsQuery>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let appointments = booking_service
        .get_staff_appointments(query.staff_id)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn get_staff_schedule(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<StaffScheduleQuery>,
) -> Result<Json<Value>, AppError> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest("Invalid date format. Use YYYY-MM-DD".to_string())
    })?;

    let booking_service = BookingService::new(&state);

    let appointments = booking_service
        .get_staff_schedule(
            query.staff_id,
            date.year() as i16,
            date.month() as i16,
            date.day() as i16,
        )
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn confirm_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<i32>,
    Json(request): Json<ConfirmAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let lifecycle = AppointmentLifecycleService::new(&state);

    let appointment = lifecycle
        .confirm_appointment(appointment_id, request)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment confirmed successfully"
    })))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<i32>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let lifecycle = AppointmentLifecycleService::new(&state);

    let appointment = lifecycle
        .update_status(appointment_id, request.status)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment status updated successfully"
    })))
}
