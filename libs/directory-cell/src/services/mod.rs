pub mod catalog;
pub mod customers;
pub mod staff;

pub use catalog::{OutletDirectory, ServiceCatalog};
pub use customers::{CustomerDirectory, VehicleRegistry};
pub use staff::StaffDirectory;
