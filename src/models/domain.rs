use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub use crate::core::timeslot::{TimeSlot, TimeSlotError};

/// Day of the nominal week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slots for one day of the week
///
/// Slots are neither sorted nor deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: Weekday,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

impl DaySchedule {
    pub fn new(day: Weekday, slots: Vec<TimeSlot>) -> Self {
        Self { day, slots }
    }
}

/// Slots listed for `day`, taken from the first entry for that day
///
/// A missing entry means no availability (or no need) on that day.
pub fn slots_on(schedule: &[DaySchedule], day: Weekday) -> &[TimeSlot] {
    schedule
        .iter()
        .find(|entry| entry.day == day)
        .map(|entry| entry.slots.as_slice())
        .unwrap_or(&[])
}

/// Caregiver shift length category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftType {
    /// Up to two hours per slot
    PartTime,
    /// Up to four hours per slot
    MidTime,
    #[default]
    Anytime,
}

impl ShiftType {
    /// Longest slot this shift type may work, `None` when unrestricted
    pub fn max_minutes(&self) -> Option<u32> {
        match self {
            ShiftType::PartTime => Some(120),
            ShiftType::MidTime => Some(240),
            ShiftType::Anytime => None,
        }
    }
}

/// Caregiver offering availability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caregiver {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(rename = "weeklySchedule", default)]
    pub weekly_schedule: Vec<DaySchedule>,
    /// Client ids this caregiver must never be matched with
    #[serde(default)]
    pub exclusions: BTreeSet<String>,
    #[serde(rename = "shiftType", default)]
    pub shift_type: ShiftType,
}

impl Caregiver {
    pub fn slots_on(&self, day: Weekday) -> &[TimeSlot] {
        slots_on(&self.weekly_schedule, day)
    }
}

/// Client with care needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(rename = "weeklySchedule", default)]
    pub weekly_schedule: Vec<DaySchedule>,
    /// Caregiver ids this client must never be matched with
    #[serde(default)]
    pub exclusions: BTreeSet<String>,
}

impl Client {
    pub fn slots_on(&self, day: Weekday) -> &[TimeSlot] {
        slots_on(&self.weekly_schedule, day)
    }
}

/// A caregiver able to cover one client need slot, in whole or in part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "caregiverId")]
    pub caregiver_id: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
    pub day: Weekday,
    /// The client's need slot, never the caregiver's slot or the intersection
    #[serde(rename = "timeSlot")]
    pub time_slot: TimeSlot,
    pub score: f64,
}

/// One conflict-free proposed assignment set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOption {
    pub option: u8,
    pub matches: Vec<Match>,
    #[serde(rename = "totalScore")]
    pub total_score: f64,
    pub efficiency: f64,
}

/// Switches for the match generator
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingOptions {
    /// Skip caregiver slots longer than the caregiver's shift type allows
    pub enforce_shift_caps: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caregiver_deserializes_from_wire_shape() {
        let json = r#"{
            "id": "cg-1",
            "name": "Sarah Johnson",
            "address": "123 Oak Street, Downtown",
            "phone": "(555) 123-4567",
            "weeklySchedule": [
                { "day": "monday", "slots": [{ "start": "09:00", "end": "11:00" }] }
            ],
            "exclusions": ["cl-9"],
            "shiftType": "part-time"
        }"#;

        let caregiver: Caregiver = serde_json::from_str(json).unwrap();
        assert_eq!(caregiver.shift_type, ShiftType::PartTime);
        assert!(caregiver.exclusions.contains("cl-9"));
        assert_eq!(caregiver.slots_on(Weekday::Monday).len(), 1);
        assert!(caregiver.slots_on(Weekday::Tuesday).is_empty());
    }

    #[test]
    fn test_shift_type_defaults_to_anytime() {
        let json = r#"{ "id": "cg-2", "name": "Michael Chen", "address": "456 Pine Ave" }"#;
        let caregiver: Caregiver = serde_json::from_str(json).unwrap();
        assert_eq!(caregiver.shift_type, ShiftType::Anytime);
        assert_eq!(caregiver.shift_type.max_minutes(), None);
    }

    #[test]
    fn test_slots_on_uses_first_entry() {
        let schedule = vec![
            DaySchedule::new(Weekday::Friday, vec![TimeSlot::parse("08:00", "09:00").unwrap()]),
            DaySchedule::new(Weekday::Friday, vec![TimeSlot::parse("13:00", "15:00").unwrap()]),
        ];
        let slots = slots_on(&schedule, Weekday::Friday);
        assert_eq!(slots, &[TimeSlot::parse("08:00", "09:00").unwrap()]);
    }

    #[test]
    fn test_invalid_slot_rejects_whole_record() {
        let json = r#"{
            "id": "cl-1", "name": "Emily", "address": "789 Maple",
            "weeklySchedule": [{ "day": "monday", "slots": [{ "start": "xx", "end": "11:00" }] }]
        }"#;
        assert!(serde_json::from_str::<Client>(json).is_err());
    }
}
