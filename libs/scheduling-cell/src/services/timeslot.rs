// libs/scheduling-cell/src/services/timeslot.rs
use chrono::NaiveTime;
use tracing::debug;

use directory_cell::services::staff::StaffDirectory;
use shared_config::AppConfig;
use shared_database::DatabaseError;

use crate::models::{SchedulingError, TimeSlot};
use crate::services::availability::{available_start_times, staff_free_ranges};
use crate::services::stores::{AppointmentStore, TimeSlotStore};

/// The availability engine: per-staff free ranges for one outlet and day,
/// folded into outlet-level bookable slots, plus lazy slot materialization.
pub struct TimeSlotService {
    staff_directory: StaffDirectory,
    appointments: AppointmentStore,
    slots: TimeSlotStore,
}

impl TimeSlotService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            staff_directory: StaffDirectory::new(config),
            appointments: AppointmentStore::new(config),
            slots: TimeSlotStore::new(config),
        }
    }

    /// Get available time slots for a specific date and outlet. A slot is
    /// available when at least one staff member is free for its whole
    /// duration. Existing rows are reused; everything else comes back as an
    /// unpersisted candidate, since rows are only created when a booking
    /// commits.
    pub async fn get_available_time_slots(
        &self,
        year: i16,
        month: i16,
        day: i16,
        outlet_id: i32,
    ) -> Result<Vec<TimeSlot>, SchedulingError> {
        let roster = self.staff_directory.list_by_outlet(outlet_id).await?;

        if roster.is_empty() {
            return Ok(Vec::new());
        }

        let appointments = self
            .appointments
            .find_by_outlet_and_date(outlet_id, year, month, day)
            .await?;

        let availability = staff_free_ranges(&roster, &appointments);

        let mut slots = Vec::new();
        for time in available_start_times(&availability) {
            match self.slots.find_by_exact_date_time(year, month, day, time).await? {
                Some(existing) => slots.push(existing),
                None => slots.push(TimeSlot::candidate(year, month, day, time)),
            }
        }

        slots.sort_by_key(|slot| slot.time_clocktime);

        debug!(
            "Found {} available slots for outlet {} on {}-{}-{}",
            slots.len(),
            outlet_id,
            year,
            month,
            day
        );
        Ok(slots)
    }

    /// Create a new time slot or get an existing one. Idempotent: a losing
    /// racer hits the storage uniqueness constraint and re-reads the
    /// winner's row instead of surfacing the conflict.
    pub async fn get_or_create_time_slot(
        &self,
        year: i16,
        month: i16,
        day: i16,
        time: NaiveTime,
    ) -> Result<TimeSlot, SchedulingError> {
        if let Some(existing) = self
            .slots
            .find_by_exact_date_time(year, month, day, time)
            .await?
        {
            return Ok(existing);
        }

        match self.slots.insert(year, month, day, time).await {
            Ok(slot) => Ok(slot),
            Err(DatabaseError::Conflict(_)) => {
                debug!(
                    "Concurrent creation of slot {}-{}-{} {}, re-reading winner",
                    year, month, day, time
                );
                self.slots
                    .find_by_exact_date_time(year, month, day, time)
                    .await?
                    .ok_or(SchedulingError::TimeSlotNotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persisted slots for a date, ordered by clock time.
    pub async fn get_time_slots_for_date(
        &self,
        year: i16,
        month: i16,
        day: i16,
    ) -> Result<Vec<TimeSlot>, SchedulingError> {
        let slots = self.slots.find_by_date(year, month, day).await?;
        Ok(slots)
    }

    pub async fn find_time_slot(&self, time_id: i32) -> Result<Option<TimeSlot>, SchedulingError> {
        let slot = self.slots.find_by_id(time_id).await?;
        Ok(slot)
    }
}
