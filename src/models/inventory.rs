// Inventory service record types
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reported state of a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Up,
    Down,
    Maintenance,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ServerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Up => "up",
            ServerStatus::Down => "down",
            ServerStatus::Maintenance => "maintenance",
            ServerStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A server record as returned by `/api/servers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub status: ServerStatus,
    pub environment: Option<String>,
    pub location: Option<String>,
    pub os: Option<String>,
    pub os_version: Option<String>,
    pub cpu_cores: Option<u32>,
    pub memory_gb: Option<u32>,
    pub owner_name: Option<String>,
    pub last_seen: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

impl Server {
    /// Record with only name, address and status set.
    pub fn new(name: impl Into<String>, ip_address: impl Into<String>, status: ServerStatus) -> Self {
        Self {
            id: None,
            name: name.into(),
            ip_address: ip_address.into(),
            status,
            environment: None,
            location: None,
            os: None,
            os_version: None,
            cpu_cores: None,
            memory_gb: None,
            owner_name: None,
            last_seen: None,
            tags: Vec::new(),
            notes: None,
        }
    }
}

/// Fleet-wide counts from `/api/summary`.
///
/// Every count is optional so a partial payload still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_servers: Option<u64>,
    pub active_servers: Option<u64>,
    pub servers_up: Option<u64>,
    pub servers_down: Option<u64>,
    pub servers_maintenance: Option<u64>,
    #[serde(default)]
    pub environments: BTreeMap<String, u64>,
}
