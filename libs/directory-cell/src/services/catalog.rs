use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{DatabaseError, SupabaseClient};

use crate::models::{ServiceOutlet, ServiceType};

/// Read access to the service-type catalog.
pub struct ServiceCatalog {
    supabase: SupabaseClient,
}

impl ServiceCatalog {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn find_by_id(&self, service_id: i32) -> Result<Option<ServiceType>, DatabaseError> {
        let path = format!("/rest/v1/service_types?service_id=eq.{}", service_id);
        let mut result: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        if result.is_empty() {
            return Ok(None);
        }

        let service: ServiceType = serde_json::from_value(result.remove(0))?;
        Ok(Some(service))
    }

    pub async fn find_all(&self) -> Result<Vec<ServiceType>, DatabaseError> {
        debug!("Fetching service catalog");

        let path = "/rest/v1/service_types?order=service_id.asc";
        let result: Vec<Value> = self.supabase.request(Method::GET, path, None).await?;

        let services = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<ServiceType>, _>>()?;

        Ok(services)
    }
}

/// Read access to the outlet directory.
pub struct OutletDirectory {
    supabase: SupabaseClient,
}

impl OutletDirectory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn find_by_id(&self, outlet_id: i32) -> Result<Option<ServiceOutlet>, DatabaseError> {
        let path = format!("/rest/v1/service_outlets?outlet_id=eq.{}", outlet_id);
        let mut result: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        if result.is_empty() {
            return Ok(None);
        }

        let outlet: ServiceOutlet = serde_json::from_value(result.remove(0))?;
        Ok(Some(outlet))
    }

    pub async fn find_all(&self) -> Result<Vec<ServiceOutlet>, DatabaseError> {
        debug!("Fetching outlet directory");

        let path = "/rest/v1/service_outlets?order=outlet_id.asc";
        let result: Vec<Value> = self.supabase.request(Method::GET, path, None).await?;

        let outlets = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<ServiceOutlet>, _>>()?;

        Ok(outlets)
    }
}
