//! Application state wiring the relay together.
//!
//! `AppState` holds the relay service used by the HTTP handlers. The service
//! is generic over store and provider traits; AppState pins the store to the
//! SQLite implementation and the provider to a type-erased box so the
//! process can construct a Gemini client while tests substitute fakes.

use std::sync::Arc;

use spurchat_core::completion::BoxCompletionProvider;
use spurchat_core::relay::RelayService;
use spurchat_infra::config::{RelayConfig, SYSTEM_INSTRUCTION};
use spurchat_infra::gemini::GeminiClient;
use spurchat_infra::sqlite::{DatabasePool, SqliteChatStore};

/// Concrete type alias for the relay service pinned to infra implementations.
pub type ConcreteRelayService = RelayService<SqliteChatStore, BoxCompletionProvider>;

/// Shared application state behind every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConcreteRelayService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize production state: connect to the database, build the
    /// Gemini client, wire the relay.
    pub async fn init(config: RelayConfig) -> anyhow::Result<Self> {
        // SQLite creates the database file but not its parent directory.
        if let Some(path) = config.database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if let Some(parent) = std::path::Path::new(path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let db_pool = DatabasePool::new(&config.database_url).await?;

        let provider = BoxCompletionProvider::new(GeminiClient::new(
            config.gemini_api_key,
            config.model,
            SYSTEM_INSTRUCTION.to_string(),
        ));

        Ok(Self::new(db_pool, provider))
    }

    /// Wire state from an already-connected pool and an arbitrary provider.
    pub fn new(db_pool: DatabasePool, provider: BoxCompletionProvider) -> Self {
        let store = SqliteChatStore::new(db_pool.clone());
        Self {
            relay: Arc::new(RelayService::new(store, provider)),
            db_pool,
        }
    }
}
