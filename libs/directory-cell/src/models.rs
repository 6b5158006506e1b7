// libs/directory-cell/src/models.rs
use serde::{Deserialize, Serialize};

/// A mechanic or service advisor. Every staff member belongs to exactly
/// one outlet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub staff_id: i32,
    pub staff_name: String,
    pub staff_role: Option<String>,
    pub staff_phone: Option<String>,
    pub outlet_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub cust_id: i32,
    pub cust_name: String,
    pub cust_phone: Option<String>,
    pub cust_email: Option<String>,
    pub cust_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub veh_id: i32,
    pub veh_plateno: String,
    pub veh_model: Option<String>,
    pub veh_brand: Option<String>,
    pub veh_type: Option<String>,
    pub veh_year: Option<i16>,
    pub cust_id: i32,
}

/// A bookable service offering. `service_duration` is the standard
/// duration in minutes, used as the default when a booking omits one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceType {
    pub service_id: i32,
    pub service_type: String,
    pub service_desc: Option<String>,
    pub service_category: Option<String>,
    pub service_price: Option<f64>,
    pub service_duration: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOutlet {
    pub outlet_id: i32,
    pub outlet_name: String,
    pub outlet_address: Option<String>,
    pub outlet_city: Option<String>,
    pub outlet_state: Option<String>,
    pub outlet_postal_code: Option<String>,
}
