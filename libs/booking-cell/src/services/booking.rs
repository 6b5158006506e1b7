// libs/booking-cell/src/services/booking.rs
use tracing::{debug, warn};

use directory_cell::services::catalog::{OutletDirectory, ServiceCatalog};
use directory_cell::services::customers::{CustomerDirectory, VehicleRegistry};
use directory_cell::services::staff::StaffDirectory;
use notification_cell::services::notify::NotificationService;
use scheduling_cell::models::{Appointment, AppointmentStatus, NewAppointment, StaffAssignment};
use scheduling_cell::services::availability::SLOT_DURATION_MINUTES;
use scheduling_cell::services::stores::AppointmentStore;
use scheduling_cell::services::timeslot::TimeSlotService;
use shared_config::AppConfig;

use crate::models::{BookAppointmentRequest, BookingError};

/// Translates booking requests into a persisted time slot plus a new
/// PENDING appointment, and serves appointment reads.
pub struct BookingService {
    customers: CustomerDirectory,
    vehicles: VehicleRegistry,
    services: ServiceCatalog,
    outlets: OutletDirectory,
    staff: StaffDirectory,
    timeslots: TimeSlotService,
    appointments: AppointmentStore,
    notifier: NotificationService,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            customers: CustomerDirectory::new(config),
            vehicles: VehicleRegistry::new(config),
            services: ServiceCatalog::new(config),
            outlets: OutletDirectory::new(config),
            staff: StaffDirectory::new(config),
            timeslots: TimeSlotService::new(config),
            appointments: AppointmentStore::new(config),
            notifier: NotificationService::new(config),
        }
    }

    /// Book a new appointment. All referenced entities are validated before
    /// anything is written; the slot is materialized on demand; the booking
    /// notification runs after the insert and never fails the booking.
    pub async fn create_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        debug!("Creating appointment for customer {}", request.cust_id);

        let customer = self
            .customers
            .find_by_id(request.cust_id)
            .await?
            .ok_or(BookingError::CustomerNotFound)?;

        self.vehicles
            .find_by_id(request.veh_id)
            .await?
            .ok_or(BookingError::VehicleNotFound)?;

        let service = self
            .services
            .find_by_id(request.service_id)
            .await?
            .ok_or(BookingError::ServiceNotFound)?;

        self.outlets
            .find_by_id(request.outlet_id)
            .await?
            .ok_or(BookingError::OutletNotFound)?;

        // Resolve the slot: an explicit id must exist; inline fields get or
        // create the row (this is the only place generation-time candidates
        // are materialized).
        let time_slot = if let Some(time_id) = request.time_id {
            self.timeslots
                .find_time_slot(time_id)
                .await?
                .ok_or(BookingError::TimeSlotNotFound)?
        } else if let Some(spec) = &request.time_slot {
            self.timeslots
                .get_or_create_time_slot(
                    spec.time_year,
                    spec.time_month,
                    spec.time_day,
                    spec.time_clocktime,
                )
                .await?
        } else {
            return Err(BookingError::MissingTimeSlot);
        };

        let time_id = time_slot.time_id.ok_or(BookingError::TimeSlotNotFound)?;

        let duration = request
            .appointment_duration
            .or(service.service_duration)
            .unwrap_or(SLOT_DURATION_MINUTES as i32);

        // Bookings always start PENDING and unassigned; a real staff member
        // is chosen at confirmation.
        let appointment = self
            .appointments
            .insert(NewAppointment {
                cust_id: request.cust_id,
                service_id: request.service_id,
                outlet_id: request.outlet_id,
                veh_id: request.veh_id,
                time_id,
                staff_id: StaffAssignment::Unassigned,
                appointment_cost: request.appointment_cost.or(service.service_price),
                appointment_duration: duration,
                appointment_status: AppointmentStatus::Pending,
            })
            .await?;

        debug!("Appointment inserted with ID: {}", appointment.appointment_id);

        let date_label = format!(
            "{}-{}-{} at {}",
            time_slot.time_year, time_slot.time_month, time_slot.time_day, time_slot.time_clocktime
        );

        if let Err(e) = self
            .notifier
            .notify_appointment_booked(
                customer.cust_id,
                appointment.appointment_id,
                &service.service_type,
                &date_label,
                customer.cust_email.as_deref(),
            )
            .await
        {
            warn!("Failed to send booking notification: {}", e);
        }

        Ok(appointment)
    }

    pub async fn get_appointment(&self, appointment_id: i32) -> Result<Appointment, BookingError> {
        self.appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound)
    }

    pub async fn get_customer_appointments(
        &self,
        cust_id: i32,
    ) -> Result<Vec<Appointment>, BookingError> {
        let appointments = self.appointments.find_by_customer(cust_id).await?;
        Ok(appointments)
    }

    /// All appointments at the staff member's outlet, newest first.
    pub async fn get_staff_appointments(
        &self,
        staff_id: i32,
    ) -> Result<Vec<Appointment>, BookingError> {
        let staff = self
            .staff
            .find_by_id(staff_id)
            .await?
            .ok_or(BookingError::StaffNotFound(staff_id))?;

        let appointments = self.appointments.find_by_outlet(staff.outlet_id).await?;
        Ok(appointments)
    }

    /// One staff member's confirmed appointments (SCHEDULED or IN_PROGRESS)
    /// for a single date.
    pub async fn get_staff_schedule(
        &self,
        staff_id: i32,
        year: i16,
        month: i16,
        day: i16,
    ) -> Result<Vec<Appointment>, BookingError> {
        self.staff
            .find_by_id(staff_id)
            .await?
            .ok_or(BookingError::StaffNotFound(staff_id))?;

        let mut appointments = self
            .appointments
            .find_by_staff_and_date(staff_id, year, month, day)
            .await?;

        appointments.retain(|a| {
            matches!(
                a.appointment_status,
                AppointmentStatus::Scheduled | AppointmentStatus::InProgress
            )
        });

        Ok(appointments)
    }
}
