// Service exports
pub mod roster;

pub use roster::{CaregiverRecord, ClientRecord, RosterError, RosterStore, StoredScheduleOption};
