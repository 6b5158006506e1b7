// libs/booking-cell/src/models.rs
use chrono::NaiveTime;
use serde::Deserialize;

use scheduling_cell::models::{AppointmentStatus, SchedulingError};
use shared_database::DatabaseError;

/// Inline slot fields on a booking request. Every field is required, so
/// incomplete slot information is rejected at deserialization rather than
/// reconciled downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSlotSpec {
    pub time_year: i16,
    pub time_month: i16,
    pub time_day: i16,
    pub time_clocktime: NaiveTime,
}

/// A customer booking request, referencing either an existing slot by id or
/// inline date/time fields. There is deliberately no staff field: a booking
/// always starts unassigned, whatever the caller sends.
#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentRequest {
    pub cust_id: i32,
    pub veh_id: i32,
    pub service_id: i32,
    pub outlet_id: i32,
    #[serde(default)]
    pub time_id: Option<i32>,
    #[serde(default)]
    pub time_slot: Option<TimeSlotSpec>,
    #[serde(default)]
    pub appointment_duration: Option<i32>,
    #[serde(default)]
    pub appointment_cost: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmAppointmentRequest {
    #[serde(default)]
    pub staff_id: Option<i32>,
    /// HH:MM:SS; parsed before any write.
    #[serde(default)]
    pub estimated_finish_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("Invalid customer ID")]
    CustomerNotFound,

    #[error("Invalid vehicle ID")]
    VehicleNotFound,

    #[error("Invalid service ID")]
    ServiceNotFound,

    #[error("Invalid outlet ID")]
    OutletNotFound,

    #[error("Staff with ID {0} not found")]
    StaffNotFound(i32),

    #[error("Invalid time slot ID")]
    TimeSlotNotFound,

    #[error("Time slot information is required")]
    MissingTimeSlot,

    #[error("Appointment cannot be modified in current status: {0}")]
    InvalidStatusTransition(AppointmentStatus),

    #[error("Invalid time format for estimated finish time. Use HH:MM:SS format.")]
    InvalidFinishTime,

    #[error("Scheduling error: {0}")]
    Scheduling(#[from] SchedulingError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}
