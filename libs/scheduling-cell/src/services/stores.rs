// libs/scheduling-cell/src/services/stores.rs
use chrono::NaiveTime;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{DatabaseError, SupabaseClient};

use crate::models::{quarter_for_month, Appointment, AppointmentStatus, NewAppointment, TimeSlot};

fn return_representation() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Prefer", HeaderValue::from_static("return=representation"));
    headers
}

/// Persistence access for time-slot rows. The storage schema enforces a
/// uniqueness constraint on (year, month, day, clocktime); a duplicate
/// insert surfaces as `DatabaseError::Conflict`.
pub struct TimeSlotStore {
    supabase: SupabaseClient,
}

impl TimeSlotStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn find_by_exact_date_time(
        &self,
        year: i16,
        month: i16,
        day: i16,
        time: NaiveTime,
    ) -> Result<Option<TimeSlot>, DatabaseError> {
        let path = format!(
            "/rest/v1/time_slots?time_year=eq.{}&time_month=eq.{}&time_day=eq.{}&time_clocktime=eq.{}",
            year,
            month,
            day,
            time.format("%H:%M:%S")
        );
        let mut result: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        if result.is_empty() {
            return Ok(None);
        }

        let slot: TimeSlot = serde_json::from_value(result.remove(0))?;
        Ok(Some(slot))
    }

    pub async fn find_by_date(
        &self,
        year: i16,
        month: i16,
        day: i16,
    ) -> Result<Vec<TimeSlot>, DatabaseError> {
        let path = format!(
            "/rest/v1/time_slots?time_year=eq.{}&time_month=eq.{}&time_day=eq.{}&order=time_clocktime.asc",
            year, month, day
        );
        let result: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        let slots = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<TimeSlot>, _>>()?;

        Ok(slots)
    }

    pub async fn find_by_id(&self, time_id: i32) -> Result<Option<TimeSlot>, DatabaseError> {
        let path = format!("/rest/v1/time_slots?time_id=eq.{}", time_id);
        let mut result: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        if result.is_empty() {
            return Ok(None);
        }

        let slot: TimeSlot = serde_json::from_value(result.remove(0))?;
        Ok(Some(slot))
    }

    pub async fn insert(
        &self,
        year: i16,
        month: i16,
        day: i16,
        time: NaiveTime,
    ) -> Result<TimeSlot, DatabaseError> {
        debug!("Inserting time slot {}-{}-{} {}", year, month, day, time);

        let body = serde_json::json!({
            "time_year": year,
            "time_quarter": quarter_for_month(month),
            "time_month": month,
            "time_day": day,
            "time_clocktime": time.format("%H:%M:%S").to_string(),
        });

        let mut result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/time_slots",
                Some(body),
                Some(return_representation()),
            )
            .await?;

        if result.is_empty() {
            return Err(DatabaseError::Api {
                status: 500,
                message: "Time slot insert returned no row".to_string(),
            });
        }

        let slot: TimeSlot = serde_json::from_value(result.remove(0))?;
        Ok(slot)
    }
}

/// Persistence access for appointment rows. Reads embed the referenced
/// time-slot row so callers get the slot's clock time without a second
/// query.
pub struct AppointmentStore {
    supabase: SupabaseClient,
}

const APPOINTMENT_SELECT: &str = "select=*,time_slot:time_slots(*)";
const APPOINTMENT_SELECT_INNER: &str = "select=*,time_slot:time_slots!inner(*)";

impl AppointmentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// All of an outlet's appointments whose slot falls on the given date.
    pub async fn find_by_outlet_and_date(
        &self,
        outlet_id: i32,
        year: i16,
        month: i16,
        day: i16,
    ) -> Result<Vec<Appointment>, DatabaseError> {
        let path = format!(
            "/rest/v1/service_appointments?{}&outlet_id=eq.{}&time_slot.time_year=eq.{}&time_slot.time_month=eq.{}&time_slot.time_day=eq.{}",
            APPOINTMENT_SELECT_INNER, outlet_id, year, month, day
        );
        self.fetch_list(&path).await
    }

    pub async fn find_by_staff_and_date(
        &self,
        staff_id: i32,
        year: i16,
        month: i16,
        day: i16,
    ) -> Result<Vec<Appointment>, DatabaseError> {
        let path = format!(
            "/rest/v1/service_appointments?{}&staff_id=eq.{}&time_slot.time_year=eq.{}&time_slot.time_month=eq.{}&time_slot.time_day=eq.{}",
            APPOINTMENT_SELECT_INNER, staff_id, year, month, day
        );
        self.fetch_list(&path).await
    }

    pub async fn find_by_customer(&self, cust_id: i32) -> Result<Vec<Appointment>, DatabaseError> {
        let path = format!(
            "/rest/v1/service_appointments?{}&cust_id=eq.{}&order=appointment_id.desc",
            APPOINTMENT_SELECT, cust_id
        );
        self.fetch_list(&path).await
    }

    pub async fn find_by_outlet(&self, outlet_id: i32) -> Result<Vec<Appointment>, DatabaseError> {
        let path = format!(
            "/rest/v1/service_appointments?{}&outlet_id=eq.{}&order=appointment_id.desc",
            APPOINTMENT_SELECT, outlet_id
        );
        self.fetch_list(&path).await
    }

    pub async fn find_by_id(
        &self,
        appointment_id: i32,
    ) -> Result<Option<Appointment>, DatabaseError> {
        let path = format!(
            "/rest/v1/service_appointments?{}&appointment_id=eq.{}",
            APPOINTMENT_SELECT, appointment_id
        );
        let mut result: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        if result.is_empty() {
            return Ok(None);
        }

        let appointment: Appointment = serde_json::from_value(result.remove(0))?;
        Ok(Some(appointment))
    }

    pub async fn insert(&self, new: NewAppointment) -> Result<Appointment, DatabaseError> {
        debug!("Inserting appointment for customer {}", new.cust_id);

        let body = serde_json::to_value(&new)?;
        let mut result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/service_appointments",
                Some(body),
                Some(return_representation()),
            )
            .await?;

        if result.is_empty() {
            return Err(DatabaseError::Api {
                status: 500,
                message: "Appointment insert returned no row".to_string(),
            });
        }

        let appointment: Appointment = serde_json::from_value(result.remove(0))?;
        Ok(appointment)
    }

    /// Unconditional partial update; returns the number of affected rows.
    pub async fn update(&self, appointment_id: i32, patch: Value) -> Result<usize, DatabaseError> {
        let path = format!(
            "/rest/v1/service_appointments?appointment_id=eq.{}",
            appointment_id
        );
        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(patch),
                Some(return_representation()),
            )
            .await?;

        Ok(result.len())
    }

    /// Guarded partial update: applied only while the row still holds
    /// `expected` status, so a concurrent transition cannot be overwritten.
    /// Returns the updated row, or None when the guard did not match.
    pub async fn update_where_status(
        &self,
        appointment_id: i32,
        expected: AppointmentStatus,
        patch: Value,
    ) -> Result<Option<Appointment>, DatabaseError> {
        let path = format!(
            "/rest/v1/service_appointments?appointment_id=eq.{}&appointment_status=eq.{}",
            appointment_id, expected
        );
        let mut result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(patch),
                Some(return_representation()),
            )
            .await?;

        if result.is_empty() {
            return Ok(None);
        }

        let appointment: Appointment = serde_json::from_value(result.remove(0))?;
        Ok(Some(appointment))
    }

    async fn fetch_list(&self, path: &str) -> Result<Vec<Appointment>, DatabaseError> {
        let result: Vec<Value> = self.supabase.request(Method::GET, path, None).await?;

        let appointments = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Appointment>, _>>()?;

        Ok(appointments)
    }
}
