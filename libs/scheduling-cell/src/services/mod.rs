pub mod availability;
pub mod stores;
pub mod timeslot;

pub use stores::{AppointmentStore, TimeSlotStore};
pub use timeslot::TimeSlotService;
