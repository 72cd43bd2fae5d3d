//! Care Scheduler - caregiver to client matching and schedule options
//!
//! This library provides the matching engine: time-slot overlap arithmetic,
//! candidate scoring, and three selection strategies that turn scored
//! candidates into conflict-free schedule options with an efficiency figure.
//! The HTTP layer and in-memory roster wrap the engine for the service binary.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{DistanceProvider, MatchResult, Matcher, Strategy};
pub use crate::models::{Caregiver, Client, DaySchedule, Match, ScheduleOption, ShiftType, TimeSlot, Weekday};
