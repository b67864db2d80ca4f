//! Saved servers: an ordered list of connection profiles persisted under a single
//! storage key (`server_monitor_servers`) as a JSON array.
//!
//! Every call reads storage afresh and every mutation rewrites the whole list.
//! Nothing guards the read-modify-write against another process sharing the same
//! storage, so concurrent writers are last-writer-wins.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::KeyValueStore;
use crate::types::{Credentials, Transport};

pub const STORAGE_KEY: &str = "server_monitor_servers";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerProfile {
    pub id: String,
    pub server: String,
    pub username: String,
    pub password: String,
    pub port: u16,
    pub transport: Transport,
    pub created_at: DateTime<Utc>,
    pub last_used: DateTime<Utc>,
}

impl ServerProfile {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            server: self.server.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            port: self.port,
            transport: self.transport,
        }
    }
}

// Export shape: same field names, no password.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RedactedProfile<'a> {
    id: &'a str,
    server: &'a str,
    username: &'a str,
    port: u16,
    transport: Transport,
    created_at: &'a DateTime<Utc>,
    last_used: &'a DateTime<Utc>,
}

impl<'a> From<&'a ServerProfile> for RedactedProfile<'a> {
    fn from(p: &'a ServerProfile) -> Self {
        Self {
            id: &p.id,
            server: &p.server,
            username: &p.username,
            port: p.port,
            transport: p.transport,
            created_at: &p.created_at,
            last_used: &p.last_used,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write saved servers: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize saved servers: {0}")]
    Serialize(#[from] serde_json::Error),
}

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct ProfileStore {
    backend: Arc<dyn KeyValueStore>,
    clock: Clock,
}

impl ProfileStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the timestamp source (tests pin time with this).
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// All profiles in stored order. Missing or unreadable data yields an empty list.
    pub fn get_all(&self) -> Vec<ServerProfile> {
        let raw = match self.backend.get_item(STORAGE_KEY) {
            Ok(Some(s)) => s,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("reading saved servers failed, treating as empty: {e}");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("saved servers are corrupt, treating as empty: {e}");
            Vec::new()
        })
    }

    pub fn get_by_id(&self, id: &str) -> Option<ServerProfile> {
        self.get_all().into_iter().find(|p| p.id == id)
    }

    /// Upsert by exact `server` match. An existing entry keeps its position, `id`
    /// and `created_at`; everything else is replaced and `last_used` refreshed.
    pub fn save(&self, input: &Credentials) -> Result<ServerProfile, StoreError> {
        let mut all = self.get_all();
        let now = (self.clock)();

        let saved = match all.iter_mut().find(|p| p.server == input.server) {
            Some(existing) => {
                existing.username = input.username.clone();
                existing.password = input.password.clone();
                existing.port = input.port;
                existing.transport = input.transport;
                existing.last_used = now;
                existing.clone()
            }
            None => {
                let profile = ServerProfile {
                    id: fresh_id(&all),
                    server: input.server.clone(),
                    username: input.username.clone(),
                    password: input.password.clone(),
                    port: input.port,
                    transport: input.transport,
                    created_at: now,
                    last_used: now,
                };
                all.push(profile.clone());
                profile
            }
        };

        self.persist(&all)?;
        debug!(id = %saved.id, server = %saved.server, "saved server profile");
        Ok(saved)
    }

    /// Touch `last_used`. Unknown ids are ignored.
    pub fn update_last_used(&self, id: &str) -> Result<(), StoreError> {
        let mut all = self.get_all();
        let Some(p) = all.iter_mut().find(|p| p.id == id) else {
            return Ok(());
        };
        p.last_used = (self.clock)();
        self.persist(&all)
    }

    /// Returns whether anything was removed. Deleting an unknown id is not an error.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut all = self.get_all();
        let before = all.len();
        all.retain(|p| p.id != id);
        if all.len() == before {
            return Ok(false);
        }
        self.persist(&all)?;
        debug!(%id, "deleted server profile");
        Ok(true)
    }

    pub fn clear_all(&self) -> Result<bool, StoreError> {
        let had_entries = !self.get_all().is_empty();
        self.backend.remove_item(STORAGE_KEY)?;
        Ok(had_entries)
    }

    /// Pretty-printed JSON of every profile without its password.
    pub fn export_redacted(&self) -> Result<String, StoreError> {
        let all = self.get_all();
        let redacted: Vec<RedactedProfile<'_>> = all.iter().map(RedactedProfile::from).collect();
        Ok(serde_json::to_string_pretty(&redacted)?)
    }

    fn persist(&self, all: &[ServerProfile]) -> Result<(), StoreError> {
        let data = serde_json::to_string(all)?;
        self.backend.set_item(STORAGE_KEY, &data).map_err(|e| {
            warn!("writing saved servers failed: {e}");
            StoreError::from(e)
        })
    }
}

fn fresh_id(existing: &[ServerProfile]) -> String {
    loop {
        let id = uuid::Uuid::new_v4().to_string();
        if !existing.iter().any(|p| p.id == id) {
            return id;
        }
    }
}
