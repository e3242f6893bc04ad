use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::models::treaty::{Treaty, TreatyId};
use crate::storage::LocalStorage;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The HTTP client shared by every request.
    pub http: reqwest::Client,
    /// The application's configuration.
    pub config: Config,
    /// Client-local storage holding the session keys.
    pub storage: Arc<LocalStorage>,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub fn new(config: &Config) -> Result<Self> {
        let storage = match &config.storage_path {
            Some(path) => LocalStorage::open(path)?,
            None => LocalStorage::in_memory(),
        };
        tracing::info!("✅ Local storage ready");

        let http = reqwest::Client::builder()
            .user_agent(concat!("treaty-ledger/", env!("CARGO_PKG_VERSION")))
            .build()?;
        tracing::info!("✅ HTTP client initialized for {}", config.api_url);

        Ok(AppState {
            http,
            config: config.clone(),
            storage: Arc::new(storage),
        })
    }
}

/// The treaty a detail page is currently showing.
///
/// Both fields are overwritten on every detail fetch; the last fetch wins.
#[derive(Debug, Default, Clone)]
pub struct TreatyContext {
    /// The identifier most recently requested.
    pub current_id: Option<TreatyId>,
    /// The last successfully fetched record.
    pub snapshot: Option<Treaty>,
}

impl TreatyContext {
    /// The identifier that save and archive act on.
    pub fn snapshot_id(&self) -> Option<TreatyId> {
        self.snapshot.as_ref().map(|treaty| treaty.id)
    }
}
