// libs/scheduling-cell/src/services/availability.rs
//
// Per-staff availability over a single day. Pure functions: the caller
// supplies the roster and the day's appointments, nothing is fetched or
// stored here.

use std::collections::HashMap;

use chrono::{Duration, NaiveTime};

use directory_cell::models::Staff;

use crate::models::{Appointment, TimeRange};

pub const SLOT_DURATION_MINUTES: i64 = 60;

/// 9:00 AM
pub fn business_hours_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}

/// 5:00 PM
pub fn business_hours_end() -> NaiveTime {
    NaiveTime::from_hms_opt(17, 0, 0).unwrap()
}

/// Calculate each staff member's free ranges: start everyone with the full
/// business-hours window, then subtract the busy interval of every
/// appointment that actually consumes staff time.
pub fn staff_free_ranges(
    roster: &[Staff],
    appointments: &[Appointment],
) -> HashMap<i32, Vec<TimeRange>> {
    let mut availability: HashMap<i32, Vec<TimeRange>> = HashMap::new();

    for staff in roster {
        availability.insert(
            staff.staff_id,
            vec![TimeRange::new(business_hours_start(), business_hours_end())],
        );
    }

    for appointment in appointments {
        if !appointment.appointment_status.occupies_staff_time() {
            continue;
        }

        let staff_id = match appointment.staff_id.staff_id() {
            Some(id) => id,
            None => continue,
        };

        let slot = match appointment.time_slot.as_ref() {
            Some(slot) => slot,
            None => continue,
        };

        // An appointment whose staff id is not in this roster belongs to
        // another outlet's computation.
        let ranges = match availability.get_mut(&staff_id) {
            Some(ranges) => ranges,
            None => continue,
        };

        let busy_start = slot.time_clocktime;
        let busy_end = appointment.busy_end(busy_start);

        *ranges = ranges
            .iter()
            .flat_map(|range| range.subtract(busy_start, busy_end))
            .collect();
    }

    availability
}

/// Hour-aligned start times within business hours for which at least one
/// staff member's free ranges fully contain the slot duration. Returned in
/// ascending order.
pub fn available_start_times(availability: &HashMap<i32, Vec<TimeRange>>) -> Vec<NaiveTime> {
    let mut times = Vec::new();
    let mut current = business_hours_start();

    while current < business_hours_end() {
        let slot_end = current + Duration::minutes(SLOT_DURATION_MINUTES);

        let is_available = availability.values().any(|ranges| {
            ranges
                .iter()
                .any(|range| range.contains_slot(current, slot_end))
        });

        if is_available {
            times.push(current);
        }

        current = current + Duration::hours(1);
    }

    times
}
