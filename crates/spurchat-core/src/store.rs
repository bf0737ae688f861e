//! ChatStore trait definition.
//!
//! The durable session/message log behind the relay. Append-only: no update
//! or delete operations are exposed.

use spurchat_types::error::StorageError;
use spurchat_types::message::{Sender, StoredMessage};

/// Store trait for session and message persistence.
///
/// Implementations live in spurchat-infra (e.g., `SqliteChatStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatStore: Send + Sync {
    /// Ensure a session row exists for the given id.
    ///
    /// Checks existence by primary-key lookup and inserts if absent.
    /// Idempotent: a second call for an existing id is a no-op, not an error.
    fn ensure_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// Append a message to a session with a store-assigned id and timestamp.
    ///
    /// The session must already exist; this does not re-check. A missing
    /// session surfaces as a foreign-key `StorageError`.
    fn append_message(
        &self,
        session_id: &str,
        sender: Sender,
        content: &str,
    ) -> impl std::future::Future<Output = Result<StoredMessage, StorageError>> + Send;

    /// Get all messages for a session, ordered by created_at ASC.
    ///
    /// Returns an empty Vec (not an error) when the session has no messages
    /// or does not exist.
    fn list_messages(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<StoredMessage>, StorageError>> + Send;
}
