use serde::{Deserialize, Serialize};
use crate::models::domain::ScheduleOption;

/// Response for the schedule generation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub options: Vec<ScheduleOption>,
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
