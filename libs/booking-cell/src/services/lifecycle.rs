// libs/booking-cell/src/services/lifecycle.rs
use chrono::NaiveTime;
use serde_json::{json, Value};
use tracing::{debug, warn};

use directory_cell::services::catalog::ServiceCatalog;
use directory_cell::services::staff::StaffDirectory;
use notification_cell::services::notify::NotificationService;
use scheduling_cell::models::{Appointment, AppointmentStatus};
use scheduling_cell::services::stores::AppointmentStore;
use shared_config::AppConfig;

use crate::models::{BookingError, ConfirmAppointmentRequest};

/// Appointment status transitions: staff confirmation and the later
/// in-progress / completed / cancelled moves.
pub struct AppointmentLifecycleService {
    appointments: AppointmentStore,
    staff: StaffDirectory,
    services: ServiceCatalog,
    notifier: NotificationService,
}

impl AppointmentLifecycleService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            appointments: AppointmentStore::new(config),
            staff: StaffDirectory::new(config),
            services: ServiceCatalog::new(config),
            notifier: NotificationService::new(config),
        }
    }

    /// Confirm a PENDING appointment: optionally record an estimated finish
    /// time and assign a real staff member, then move it to SCHEDULED. All
    /// input is parsed and validated before the single guarded write, so a
    /// rejected confirmation leaves the row untouched.
    pub async fn confirm_appointment(
        &self,
        appointment_id: i32,
        request: ConfirmAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        debug!("Confirming appointment ID: {}", appointment_id);

        let appointment = self
            .appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound)?;

        // Only pending appointments can be confirmed.
        if appointment.appointment_status != AppointmentStatus::Pending {
            warn!(
                "Cannot confirm appointment with status: {}",
                appointment.appointment_status
            );
            return Err(BookingError::InvalidStatusTransition(
                appointment.appointment_status,
            ));
        }

        let estimated_finish_time = match request.estimated_finish_time.as_deref() {
            Some(raw) if !raw.is_empty() => {
                let parsed = NaiveTime::parse_from_str(raw, "%H:%M:%S")
                    .map_err(|_| BookingError::InvalidFinishTime)?;
                Some(parsed)
            }
            _ => {
                warn!(
                    "No estimated finish time provided for appointment: {}",
                    appointment_id
                );
                None
            }
        };

        if let Some(staff_id) = request.staff_id {
            if self.staff.find_by_id(staff_id).await?.is_none() {
                warn!("Staff not found with ID: {}", staff_id);
                return Err(BookingError::StaffNotFound(staff_id));
            }
        }

        let mut patch = serde_json::Map::new();
        patch.insert(
            "appointment_status".to_string(),
            json!(AppointmentStatus::Scheduled),
        );
        if let Some(finish) = estimated_finish_time {
            patch.insert(
                "estimated_finish_time".to_string(),
                json!(finish.format("%H:%M:%S").to_string()),
            );
        }
        if let Some(staff_id) = request.staff_id {
            patch.insert("staff_id".to_string(), json!(staff_id));
        }

        // Guarded write: the PATCH only applies while the row is still
        // PENDING, so two concurrent confirmations cannot both succeed.
        let updated = self
            .appointments
            .update_where_status(appointment_id, AppointmentStatus::Pending, Value::Object(patch))
            .await?;

        let updated = match updated {
            Some(appointment) => appointment,
            None => {
                // Lost the race, or the row vanished; re-read to report why.
                return match self.appointments.find_by_id(appointment_id).await? {
                    Some(current) => Err(BookingError::InvalidStatusTransition(
                        current.appointment_status,
                    )),
                    None => Err(BookingError::AppointmentNotFound),
                };
            }
        };

        self.notify_status(&updated, AppointmentStatus::Scheduled).await;

        Ok(updated)
    }

    /// Move an appointment along the status state machine. Illegal
    /// transitions are rejected without mutation.
    pub async fn update_status(
        &self,
        appointment_id: i32,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, BookingError> {
        debug!(
            "Updating appointment {} status to {}",
            appointment_id, new_status
        );

        let appointment = self
            .appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound)?;

        if !appointment.appointment_status.can_transition_to(new_status) {
            return Err(BookingError::InvalidStatusTransition(
                appointment.appointment_status,
            ));
        }

        let updated = self
            .appointments
            .update_where_status(
                appointment_id,
                appointment.appointment_status,
                json!({ "appointment_status": new_status }),
            )
            .await?;

        let updated = match updated {
            Some(appointment) => appointment,
            None => {
                return match self.appointments.find_by_id(appointment_id).await? {
                    Some(current) => Err(BookingError::InvalidStatusTransition(
                        current.appointment_status,
                    )),
                    None => Err(BookingError::AppointmentNotFound),
                };
            }
        };

        self.notify_status(&updated, new_status).await;

        Ok(updated)
    }

    /// Customer notification after a successful transition; failures are
    /// logged and swallowed so the transition outcome stands.
    async fn notify_status(&self, appointment: &Appointment, status: AppointmentStatus) {
        let service_label = match self.services.find_by_id(appointment.service_id).await {
            Ok(Some(service)) => service.service_type,
            _ => "your service".to_string(),
        };

        if let Err(e) = self
            .notifier
            .notify_status_changed(
                appointment.cust_id,
                appointment.appointment_id,
                &service_label,
                status,
            )
            .await
        {
            warn!("Failed to send status notification: {}", e);
        }
    }
}
