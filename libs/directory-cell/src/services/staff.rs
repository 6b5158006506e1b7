use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{DatabaseError, SupabaseClient};

use crate::models::Staff;

/// Narrow read interface over the staff roster.
pub struct StaffDirectory {
    supabase: SupabaseClient,
}

impl StaffDirectory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// All staff assigned to an outlet, ordered by id.
    pub async fn list_by_outlet(&self, outlet_id: i32) -> Result<Vec<Staff>, DatabaseError> {
        debug!("Fetching staff roster for outlet: {}", outlet_id);

        let path = format!("/rest/v1/staff?outlet_id=eq.{}&order=staff_id.asc", outlet_id);
        let result: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        let roster = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Staff>, _>>()?;

        Ok(roster)
    }

    pub async fn find_by_id(&self, staff_id: i32) -> Result<Option<Staff>, DatabaseError> {
        let path = format!("/rest/v1/staff?staff_id=eq.{}", staff_id);
        let mut result: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        if result.is_empty() {
            return Ok(None);
        }

        let staff: Staff = serde_json::from_value(result.remove(0))?;
        Ok(Some(staff))
    }
}
