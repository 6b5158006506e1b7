// libs/booking-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn booking_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/customer/appointments",
            post(handlers::book_appointment).get(handlers::get_customer_appointments),
        )
        .route(
            "/customer/appointments/{appointment_id}",
            get(handlers::get_appointment_details),
        )
        .route(
            "/appointments/{appointment_id}",
            get(handlers::get_appointment_details),
        )
        .route("/staff/appointments", get(handlers::get_staff_appointments))
        .route(
            "/staff/appointments/schedule",
            get(handlers::get_staff_schedule),
        )
        .route(
            "/staff/appointments/{appointment_id}",
            get(handlers::get_appointment_details),
        )
        .route(
            "/staff/appointments/{appointment_id}/confirm",
            put(handlers::confirm_appointment),
        )
        .route(
            "/staff/appointments/{appointment_id}/status",
            put(handlers::update_appointment_status),
        )
        .with_state(state)
}
