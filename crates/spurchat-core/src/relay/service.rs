//! Relay service orchestrating session persistence and completion calls.
//!
//! One chat turn is four strictly sequential steps against the store and
//! the completion provider. There is no transaction across the steps: a
//! failure after the user message was written leaves a dangling user turn
//! behind, which is the accepted failure mode (the client resubmits).

use thiserror::Error;
use tracing::{error, info};

use spurchat_types::error::{CompletionError, StorageError};
use spurchat_types::message::{Sender, StoredMessage};

use crate::completion::provider::CompletionProvider;
use crate::store::ChatStore;

/// Errors from a relay operation, by failing collaborator.
///
/// The HTTP layer collapses both variants into a generic 500; the split
/// exists for server-side logging.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Orchestrates chat turns and history reads.
///
/// Generic over `ChatStore` and `CompletionProvider` to maintain clean
/// architecture (spurchat-core never depends on spurchat-infra).
pub struct RelayService<S: ChatStore, P: CompletionProvider> {
    store: S,
    provider: P,
}

impl<S: ChatStore, P: CompletionProvider> RelayService<S, P> {
    /// Create a new relay service with the given store and provider.
    pub fn new(store: S, provider: P) -> Self {
        Self { store, provider }
    }

    /// Access the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one chat turn: persist the user message, generate a reply,
    /// persist and return it.
    ///
    /// Steps run strictly in order; any failure aborts the request and
    /// earlier writes are kept. A completion or append failure after step 2
    /// leaves a dangling user turn, by design.
    pub async fn chat(&self, session_id: &str, message: &str) -> Result<String, RelayError> {
        self.store.ensure_session(session_id).await?;

        self.store
            .append_message(session_id, Sender::User, message)
            .await?;

        let reply = match self.provider.generate(message).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(
                    session_id,
                    provider = self.provider.name(),
                    "completion failed, user turn left dangling: {e}"
                );
                return Err(e.into());
            }
        };

        self.store
            .append_message(session_id, Sender::Ai, &reply)
            .await?;

        info!(session_id, "chat turn completed");
        Ok(reply)
    }

    /// Get a session's messages in creation order.
    ///
    /// A session with no history (including an id never seen before) yields
    /// an empty Vec, so a fresh client-generated id can be queried safely.
    pub async fn history(&self, session_id: &str) -> Result<Vec<StoredMessage>, RelayError> {
        Ok(self.store.list_messages(session_id).await?)
    }
}
