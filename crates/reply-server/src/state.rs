use std::path::PathBuf;
use std::sync::Arc;

use reply_core::{AddonConfig, JsonTicketStore, Result, TicketStore};
use reply_engine::{GenerationSettings, ReplyGenerator};
use reply_llm::create_backend;

pub struct AppState {
    pub config: AddonConfig,
    pub store: Arc<dyn TicketStore>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: AddonConfig, store: Arc<dyn TicketStore>) -> Self {
        Self {
            config,
            store,
            http_client: reqwest::Client::new(),
        }
    }

    /// Opens (and creates if needed) the ticket directory.
    pub async fn with_tickets_dir(config: AddonConfig, tickets_dir: PathBuf) -> std::io::Result<Self> {
        log::info!("Initializing ticket store at: {:?}", tickets_dir);
        let store = JsonTicketStore::new(&tickets_dir);
        store.init().await?;
        Ok(Self::new(config, Arc::new(store)))
    }

    /// Builds a generator for one request. The backend is created per call
    /// because the license domain may come from the request's `Host` header.
    pub fn generator_for(&self, request_host: Option<&str>) -> Result<ReplyGenerator> {
        let backend = create_backend(&self.config, request_host, self.http_client.clone())?;
        Ok(ReplyGenerator::new(
            self.store.clone(),
            backend,
            GenerationSettings::from_config(&self.config),
        ))
    }
}
