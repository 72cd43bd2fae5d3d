// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    slots_on, Caregiver, Client, DaySchedule, Match, MatchingOptions, ScheduleOption, ShiftType, TimeSlot,
    TimeSlotError, Weekday,
};
pub use requests::{
    CreateCaregiverRequest, CreateClientRequest, GenerateQuery, MatchRequest, UpdateCaregiverRequest,
    UpdateClientRequest,
};
pub use responses::{ErrorResponse, HealthResponse, ScheduleResponse};
