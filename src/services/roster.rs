use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{
    Caregiver, Client, CreateCaregiverRequest, CreateClientRequest, ScheduleOption, UpdateCaregiverRequest,
    UpdateClientRequest,
};

/// Errors that can occur with roster operations
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: u64 },
}

/// Stored caregiver with bookkeeping fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaregiverRecord {
    #[serde(flatten)]
    pub caregiver: Caregiver,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Stored client with bookkeeping fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(flatten)]
    pub client: Client,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Stored schedule option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredScheduleOption {
    pub id: u64,
    #[serde(flatten)]
    pub option: ScheduleOption,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
struct RosterInner {
    // One counter shared by every record kind
    next_id: u64,
    caregivers: BTreeMap<u64, CaregiverRecord>,
    clients: BTreeMap<u64, ClientRecord>,
    schedule_options: BTreeMap<u64, StoredScheduleOption>,
}

impl RosterInner {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory roster of caregivers, clients and generated options
///
/// Lives for the lifetime of the process. Records are returned in creation
/// order, which is also the order the matcher sees them in.
#[derive(Debug)]
pub struct RosterStore {
    inner: RwLock<RosterInner>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RosterInner {
                next_id: 1,
                caregivers: BTreeMap::new(),
                clients: BTreeMap::new(),
                schedule_options: BTreeMap::new(),
            }),
        }
    }

    /// Caregivers and clients as matcher input, read under one lock
    pub async fn snapshot(&self) -> (Vec<Caregiver>, Vec<Client>) {
        let inner = self.inner.read().await;
        let caregivers = inner.caregivers.values().map(|r| r.caregiver.clone()).collect();
        let clients = inner.clients.values().map(|r| r.client.clone()).collect();
        (caregivers, clients)
    }

    // Caregivers

    pub async fn list_caregivers(&self) -> Vec<CaregiverRecord> {
        self.inner.read().await.caregivers.values().cloned().collect()
    }

    pub async fn get_caregiver(&self, id: u64) -> Result<CaregiverRecord, RosterError> {
        self.inner
            .read()
            .await
            .caregivers
            .get(&id)
            .cloned()
            .ok_or(RosterError::NotFound { kind: "caregiver", id })
    }

    pub async fn create_caregiver(&self, request: CreateCaregiverRequest) -> CaregiverRecord {
        let mut inner = self.inner.write().await;
        let id = inner.allocate_id();
        let record = CaregiverRecord {
            caregiver: request.into_caregiver(id.to_string()),
            created_at: Utc::now(),
        };
        inner.caregivers.insert(id, record.clone());
        record
    }

    pub async fn update_caregiver(
        &self,
        id: u64,
        update: UpdateCaregiverRequest,
    ) -> Result<CaregiverRecord, RosterError> {
        let mut inner = self.inner.write().await;
        let record = inner
            .caregivers
            .get_mut(&id)
            .ok_or(RosterError::NotFound { kind: "caregiver", id })?;
        update.apply_to(&mut record.caregiver);
        Ok(record.clone())
    }

    pub async fn delete_caregiver(&self, id: u64) -> Result<(), RosterError> {
        self.inner
            .write()
            .await
            .caregivers
            .remove(&id)
            .map(|_| ())
            .ok_or(RosterError::NotFound { kind: "caregiver", id })
    }

    // Clients

    pub async fn list_clients(&self) -> Vec<ClientRecord> {
        self.inner.read().await.clients.values().cloned().collect()
    }

    pub async fn get_client(&self, id: u64) -> Result<ClientRecord, RosterError> {
        self.inner
            .read()
            .await
            .clients
            .get(&id)
            .cloned()
            .ok_or(RosterError::NotFound { kind: "client", id })
    }

    pub async fn create_client(&self, request: CreateClientRequest) -> ClientRecord {
        let mut inner = self.inner.write().await;
        let id = inner.allocate_id();
        let record = ClientRecord {
            client: request.into_client(id.to_string()),
            created_at: Utc::now(),
        };
        inner.clients.insert(id, record.clone());
        record
    }

    pub async fn update_client(&self, id: u64, update: UpdateClientRequest) -> Result<ClientRecord, RosterError> {
        let mut inner = self.inner.write().await;
        let record = inner
            .clients
            .get_mut(&id)
            .ok_or(RosterError::NotFound { kind: "client", id })?;
        update.apply_to(&mut record.client);
        Ok(record.clone())
    }

    pub async fn delete_client(&self, id: u64) -> Result<(), RosterError> {
        self.inner
            .write()
            .await
            .clients
            .remove(&id)
            .map(|_| ())
            .ok_or(RosterError::NotFound { kind: "client", id })
    }

    // Schedule options

    pub async fn list_schedule_options(&self) -> Vec<StoredScheduleOption> {
        self.inner.read().await.schedule_options.values().cloned().collect()
    }

    pub async fn get_schedule_option(&self, id: u64) -> Result<StoredScheduleOption, RosterError> {
        self.inner
            .read()
            .await
            .schedule_options
            .get(&id)
            .cloned()
            .ok_or(RosterError::NotFound { kind: "schedule option", id })
    }

    /// Drop all stored options and store `options` in their place
    pub async fn replace_schedule_options(&self, options: Vec<ScheduleOption>) -> Vec<StoredScheduleOption> {
        let mut inner = self.inner.write().await;
        inner.schedule_options.clear();

        let now = Utc::now();
        options
            .into_iter()
            .map(|option| {
                let id = inner.allocate_id();
                let stored = StoredScheduleOption {
                    id,
                    option,
                    created_at: now,
                };
                inner.schedule_options.insert(id, stored.clone());
                stored
            })
            .collect()
    }

    pub async fn clear_schedule_options(&self) {
        self.inner.write().await.schedule_options.clear();
    }
}

impl Default for RosterStore {
    fn default() -> Self {
        Self::new()
    }
}
