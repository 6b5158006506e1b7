use reqwest::Method;
use serde_json::Value;

use shared_config::AppConfig;
use shared_database::{DatabaseError, SupabaseClient};

use crate::models::{Customer, Vehicle};

pub struct CustomerDirectory {
    supabase: SupabaseClient,
}

impl CustomerDirectory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn find_by_id(&self, cust_id: i32) -> Result<Option<Customer>, DatabaseError> {
        let path = format!("/rest/v1/customers?cust_id=eq.{}", cust_id);
        let mut result: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        if result.is_empty() {
            return Ok(None);
        }

        let customer: Customer = serde_json::from_value(result.remove(0))?;
        Ok(Some(customer))
    }
}

pub struct VehicleRegistry {
    supabase: SupabaseClient,
}

impl VehicleRegistry {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn find_by_id(&self, veh_id: i32) -> Result<Option<Vehicle>, DatabaseError> {
        let path = format!("/rest/v1/vehicles?veh_id=eq.{}", veh_id);
        let mut result: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        if result.is_empty() {
            return Ok(None);
        }

        let vehicle: Vehicle = serde_json::from_value(result.remove(0))?;
        Ok(Some(vehicle))
    }
}
