use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

use crate::models::domain::{Caregiver, Client, DaySchedule, ShiftType};

/// Request to create a caregiver
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCaregiverRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[serde(rename = "weeklySchedule", default)]
    pub weekly_schedule: Vec<DaySchedule>,
    #[serde(default)]
    pub exclusions: BTreeSet<String>,
    #[serde(rename = "shiftType", default)]
    pub shift_type: ShiftType,
}

impl CreateCaregiverRequest {
    pub fn into_caregiver(self, id: String) -> Caregiver {
        Caregiver {
            id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            weekly_schedule: self.weekly_schedule,
            exclusions: self.exclusions,
            shift_type: self.shift_type,
        }
    }
}

/// Partial caregiver update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCaregiverRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(length(min = 1))]
    pub phone: Option<String>,
    #[serde(rename = "weeklySchedule")]
    pub weekly_schedule: Option<Vec<DaySchedule>>,
    pub exclusions: Option<BTreeSet<String>>,
    #[serde(rename = "shiftType")]
    pub shift_type: Option<ShiftType>,
}

impl UpdateCaregiverRequest {
    pub fn apply_to(self, caregiver: &mut Caregiver) {
        if let Some(name) = self.name {
            caregiver.name = name;
        }
        if let Some(address) = self.address {
            caregiver.address = address;
        }
        if let Some(phone) = self.phone {
            caregiver.phone = phone;
        }
        if let Some(schedule) = self.weekly_schedule {
            caregiver.weekly_schedule = schedule;
        }
        if let Some(exclusions) = self.exclusions {
            caregiver.exclusions = exclusions;
        }
        if let Some(shift_type) = self.shift_type {
            caregiver.shift_type = shift_type;
        }
    }
}

/// Request to create a client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[serde(rename = "weeklySchedule", default)]
    pub weekly_schedule: Vec<DaySchedule>,
    #[serde(default)]
    pub exclusions: BTreeSet<String>,
}

impl CreateClientRequest {
    pub fn into_client(self, id: String) -> Client {
        Client {
            id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            weekly_schedule: self.weekly_schedule,
            exclusions: self.exclusions,
        }
    }
}

/// Partial client update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(length(min = 1))]
    pub phone: Option<String>,
    #[serde(rename = "weeklySchedule")]
    pub weekly_schedule: Option<Vec<DaySchedule>>,
    pub exclusions: Option<BTreeSet<String>>,
}

impl UpdateClientRequest {
    pub fn apply_to(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(address) = self.address {
            client.address = address;
        }
        if let Some(phone) = self.phone {
            client.phone = phone;
        }
        if let Some(schedule) = self.weekly_schedule {
            client.weekly_schedule = schedule;
        }
        if let Some(exclusions) = self.exclusions {
            client.exclusions = exclusions;
        }
    }
}

/// Stateless scheduling request carrying its own roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub caregivers: Vec<Caregiver>,
    #[serde(default)]
    pub clients: Vec<Client>,
    /// Seed for the balanced option's shuffle; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Query parameters for generating options from the stored roster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateQuery {
    pub seed: Option<u64>,
}
