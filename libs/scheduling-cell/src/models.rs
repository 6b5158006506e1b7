// libs/scheduling-cell/src/models.rs
use std::fmt;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use shared_database::DatabaseError;

// ==============================================================================
// TIME SLOT MODELS
// ==============================================================================

/// An hourly booking opportunity on a specific date. `time_id` is present
/// only once the slot has been persisted; candidates produced by the slot
/// generator carry `None` until a booking materializes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(default)]
    pub time_id: Option<i32>,
    pub time_year: i16,
    pub time_quarter: i16,
    pub time_month: i16,
    pub time_day: i16,
    pub time_clocktime: NaiveTime,
}

impl TimeSlot {
    /// An unpersisted candidate for the given date and start time.
    pub fn candidate(year: i16, month: i16, day: i16, time: NaiveTime) -> Self {
        Self {
            time_id: None,
            time_year: year,
            time_quarter: quarter_for_month(month),
            time_month: month,
            time_day: day,
            time_clocktime: time,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.time_id.is_some()
    }
}

/// quarter = ceil(month / 3)
pub fn quarter_for_month(month: i16) -> i16 {
    (month + 2) / 3
}

// ==============================================================================
// INTERVAL PRIMITIVES
// ==============================================================================

/// A contiguous interval of clock time within a single day: start inclusive,
/// end exclusive. A busy interval that only touches a range boundary does
/// not consume it; slot fit testing (`contains_slot`) is boundary-inclusive
/// on both ends, so an appointment ending exactly at 10:00 leaves the 10:00
/// slot bookable. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Remove a busy interval from this free range. Produces nothing when
    /// the busy interval covers the range, two pieces when it falls strictly
    /// inside, and the range unchanged when disjoint. Degenerate busy
    /// intervals (end <= start) cannot consume time.
    pub fn subtract(&self, busy_start: NaiveTime, busy_end: NaiveTime) -> Vec<TimeRange> {
        if busy_end <= busy_start || busy_end <= self.start || busy_start >= self.end {
            return vec![*self];
        }

        let mut remaining = Vec::new();

        if busy_start > self.start {
            remaining.push(TimeRange::new(self.start, busy_start));
        }

        if busy_end < self.end {
            remaining.push(TimeRange::new(busy_end, self.end));
        }

        remaining
    }

    /// Whether a candidate slot fits entirely within this range. A slot may
    /// start exactly at the range start and end exactly at the range end.
    pub fn contains_slot(&self, slot_start: NaiveTime, slot_end: NaiveTime) -> bool {
        slot_start >= self.start && slot_end <= self.end
    }
}

// ==============================================================================
// APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Whether an appointment in this status consumes its staff member's
    /// time. PENDING appointments have no staff commitment yet; CANCELLED
    /// ones never consumed time.
    pub fn occupies_staff_time(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled
                | AppointmentStatus::InProgress
                | AppointmentStatus::Completed
        )
    }

    /// PENDING -> SCHEDULED -> IN_PROGRESS -> COMPLETED, with CANCELLED
    /// reachable from PENDING or SCHEDULED.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        matches!(
            (self, next),
            (AppointmentStatus::Pending, AppointmentStatus::Scheduled)
                | (AppointmentStatus::Pending, AppointmentStatus::Cancelled)
                | (AppointmentStatus::Scheduled, AppointmentStatus::InProgress)
                | (AppointmentStatus::Scheduled, AppointmentStatus::Cancelled)
                | (AppointmentStatus::InProgress, AppointmentStatus::Completed)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "PENDING"),
            AppointmentStatus::Scheduled => write!(f, "SCHEDULED"),
            AppointmentStatus::InProgress => write!(f, "IN_PROGRESS"),
            AppointmentStatus::Completed => write!(f, "COMPLETED"),
            AppointmentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Staff assignment on an appointment. Bookings start `Unassigned` until a
/// staff member confirms; the availability calculator skips unassigned
/// appointments by construction. Stored as a nullable integer column.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Option<i32>", into = "Option<i32>")]
pub enum StaffAssignment {
    #[default]
    Unassigned,
    Assigned(i32),
}

impl StaffAssignment {
    pub fn staff_id(self) -> Option<i32> {
        match self {
            StaffAssignment::Unassigned => None,
            StaffAssignment::Assigned(id) => Some(id),
        }
    }

    pub fn is_assigned(self) -> bool {
        matches!(self, StaffAssignment::Assigned(_))
    }
}

impl From<Option<i32>> for StaffAssignment {
    fn from(value: Option<i32>) -> Self {
        match value {
            Some(id) => StaffAssignment::Assigned(id),
            None => StaffAssignment::Unassigned,
        }
    }
}

impl From<StaffAssignment> for Option<i32> {
    fn from(value: StaffAssignment) -> Self {
        value.staff_id()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: i32,
    pub cust_id: i32,
    pub service_id: i32,
    pub outlet_id: i32,
    pub veh_id: i32,
    pub time_id: i32,
    #[serde(default)]
    pub staff_id: StaffAssignment,
    pub appointment_cost: Option<f64>,
    pub appointment_duration: i32,
    pub appointment_status: AppointmentStatus,
    #[serde(default)]
    pub estimated_finish_time: Option<NaiveTime>,
    #[serde(default)]
    pub time_slot: Option<TimeSlot>,
}

impl Appointment {
    /// End of the busy interval starting at `start`: the recorded estimated
    /// finish time when one exists, otherwise start plus the appointment
    /// duration.
    pub fn busy_end(&self, start: NaiveTime) -> NaiveTime {
        match self.estimated_finish_time {
            Some(finish) => finish,
            None => start + Duration::minutes(self.appointment_duration as i64),
        }
    }
}

/// Insert payload for a new appointment row. The status and staff fields
/// are set by the booking coordinator, never by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    pub cust_id: i32,
    pub service_id: i32,
    pub outlet_id: i32,
    pub veh_id: i32,
    pub time_id: i32,
    pub staff_id: StaffAssignment,
    pub appointment_cost: Option<f64>,
    pub appointment_duration: i32,
    pub appointment_status: AppointmentStatus,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    #[error("Time slot not found")]
    TimeSlotNotFound,

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}
