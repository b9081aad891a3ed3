//! Read-only access to the ticketing system.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{ReplyError, Result};

/// Ticket as persisted by the ticketing system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketRecord {
    pub id: u64,
    pub subject: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub client: Option<ClientRecord>,
    /// Opening message body.
    pub message: String,
    pub date: String,
    #[serde(default)]
    pub replies: Vec<ReplyRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientRecord {
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplyRecord {
    /// Staff display name; empty or absent when the client replied.
    #[serde(default)]
    pub admin: Option<String>,
    pub message: String,
    pub date: String,
}

impl ReplyRecord {
    pub fn staff_author(&self) -> Option<&str> {
        self.admin
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn load_ticket(&self, ticket_id: u64) -> Result<Option<TicketRecord>>;
}

/// One `<id>.json` file per ticket.
#[derive(Debug, Clone)]
pub struct JsonTicketStore {
    base_path: PathBuf,
}

impl JsonTicketStore {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub async fn init(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.base_path).await
    }

    pub async fn save_ticket(&self, ticket: &TicketRecord) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(ticket)?;
        fs::write(self.ticket_path(ticket.id), json).await
    }

    fn ticket_path(&self, ticket_id: u64) -> PathBuf {
        self.base_path.join(format!("{}.json", ticket_id))
    }
}

#[async_trait]
impl TicketStore for JsonTicketStore {
    async fn load_ticket(&self, ticket_id: u64) -> Result<Option<TicketRecord>> {
        let path = self.ticket_path(ticket_id);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await.map_err(|e| {
            ReplyError::Configuration(format!("Failed to read ticket store at {:?}: {}", path, e))
        })?;
        let ticket = serde_json::from_str(&content).map_err(|e| {
            ReplyError::Configuration(format!("Corrupt ticket record {:?}: {}", path, e))
        })?;
        Ok(Some(ticket))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTicketStore {
    tickets: HashMap<u64, TicketRecord>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticket(mut self, ticket: TicketRecord) -> Self {
        self.tickets.insert(ticket.id, ticket);
        self
    }
}

#[async_trait]
impl TicketStore for InMemoryTicketStore {
    async fn load_ticket(&self, ticket_id: u64) -> Result<Option<TicketRecord>> {
        Ok(self.tickets.get(&ticket_id).cloned())
    }
}
