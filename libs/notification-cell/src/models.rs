// libs/notification-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scheduling_cell::models::AppointmentStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: i32,
    pub user_id: i32,
    pub user_type: String,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub link: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Title, message, and notification type for an appointment status change.
pub fn status_change_content(
    service_label: &str,
    status: AppointmentStatus,
) -> (String, String, &'static str) {
    match status {
        AppointmentStatus::Scheduled => (
            "Appointment Confirmed".to_string(),
            format!("Your appointment for {} has been confirmed.", service_label),
            "appointment",
        ),
        AppointmentStatus::InProgress => (
            "Service Started".to_string(),
            format!("Your {} service has started.", service_label),
            "service",
        ),
        AppointmentStatus::Completed => (
            "Service Completed".to_string(),
            format!(
                "Your {} service has been completed. Your vehicle is ready for pickup.",
                service_label
            ),
            "service",
        ),
        AppointmentStatus::Cancelled => (
            "Appointment Cancelled".to_string(),
            format!("Your appointment for {} has been cancelled.", service_label),
            "appointment",
        ),
        AppointmentStatus::Pending => (
            "Appointment Update".to_string(),
            format!(
                "Your appointment for {} has been updated to {}.",
                service_label, status
            ),
            "appointment",
        ),
    }
}
