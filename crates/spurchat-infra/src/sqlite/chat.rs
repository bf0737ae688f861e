//! SQLite chat store implementation.
//!
//! Implements `ChatStore` from `spurchat-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, RFC 3339 datetime
//! encoding.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use spurchat_core::store::ChatStore;
use spurchat_types::error::StorageError;
use spurchat_types::message::{Sender, StoredMessage};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatStore`.
pub struct SqliteChatStore {
    pool: DatabasePool,
}

impl SqliteChatStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain StoredMessage.
struct MessageRow {
    id: String,
    session_id: String,
    sender: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            sender: row.try_get("sender")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<StoredMessage, StorageError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| StorageError::Query(format!("invalid message id: {e}")))?;
        let sender: Sender = self
            .sender
            .parse()
            .map_err(|e: String| StorageError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(StoredMessage {
            id,
            session_id: self.session_id,
            sender,
            content: self.content,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Map a sqlx error to the storage error taxonomy: constraint violations
/// (foreign key, CHECK, uniqueness) are separated from connectivity and
/// plain query failures.
fn map_sqlx_error(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) => {
            let message = db.message().to_string();
            if message.contains("FOREIGN KEY")
                || message.contains("CHECK")
                || message.contains("UNIQUE")
            {
                StorageError::Constraint(message)
            } else {
                StorageError::Query(message)
            }
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StorageError::Connection(e.to_string())
        }
        _ => StorageError::Query(e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// ChatStore implementation
// ---------------------------------------------------------------------------

impl ChatStore for SqliteChatStore {
    async fn ensure_session(&self, session_id: &str) -> Result<(), StorageError> {
        let existing = sqlx::query("SELECT id FROM sessions WHERE id = ?")
            .bind(session_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        if existing.is_some() {
            return Ok(());
        }

        // OR IGNORE keeps a concurrent first-reference race a no-op instead
        // of a uniqueness error.
        sqlx::query("INSERT OR IGNORE INTO sessions (id, created_at) VALUES (?, ?)")
            .bind(session_id)
            .bind(format_datetime(&Utc::now()))
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        tracing::debug!(session_id, "session created");
        Ok(())
    }

    async fn append_message(
        &self,
        session_id: &str,
        sender: Sender,
        content: &str,
    ) -> Result<StoredMessage, StorageError> {
        let message = StoredMessage {
            id: Uuid::now_v7(),
            session_id: session_id.to_string(),
            sender,
            content: content.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO messages (id, session_id, sender, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(&message.session_id)
        .bind(message.sender.to_string())
        .bind(&message.content)
        .bind(format_datetime(&message.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        Ok(message)
    }

    async fn list_messages(&self, session_id: &str) -> Result<Vec<StoredMessage>, StorageError> {
        // The v7 id tie-breaks inserts that share a timestamp, keeping
        // retrieval order equal to insertion order.
        let rows = sqlx::query(
            "SELECT id, session_id, sender, content, created_at FROM messages WHERE session_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| {
                MessageRow::from_row(row)
                    .map_err(map_sqlx_error)
                    .and_then(MessageRow::into_message)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> (tempfile::TempDir, SqliteChatStore) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("chat.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, SqliteChatStore::new(pool))
    }

    async fn session_row_count(store: &SqliteChatStore, session_id: &str) -> i64 {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE id = ?")
            .bind(session_id)
            .fetch_one(&store.pool.reader)
            .await
            .unwrap();
        row.0
    }

    #[tokio::test]
    async fn ensure_session_is_idempotent() {
        let (_dir, store) = test_store().await;

        store.ensure_session("s1").await.unwrap();
        store.ensure_session("s1").await.unwrap();

        assert_eq!(session_row_count(&store, "s1").await, 1);
    }

    #[tokio::test]
    async fn append_and_list_roundtrip_verbatim() {
        let (_dir, store) = test_store().await;
        store.ensure_session("s1").await.unwrap();

        let content = "  spaces, \"quotes\", <tags> & emoji \u{1f600}\nsecond line\t";
        store
            .append_message("s1", Sender::User, content)
            .await
            .unwrap();

        let messages = store.list_messages("s1").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, content);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].session_id, "s1");
    }

    #[tokio::test]
    async fn list_messages_preserves_insertion_order() {
        let (_dir, store) = test_store().await;
        store.ensure_session("s1").await.unwrap();

        for i in 0..5 {
            let sender = if i % 2 == 0 { Sender::User } else { Sender::Ai };
            store
                .append_message("s1", sender, &format!("turn {i}"))
                .await
                .unwrap();
        }

        let messages = store.list_messages("s1").await.unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["turn 0", "turn 1", "turn 2", "turn 3", "turn 4"]);
        assert!(messages.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test]
    async fn list_messages_unknown_session_returns_empty() {
        let (_dir, store) = test_store().await;

        let messages = store.list_messages("never-seen").await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn append_without_session_violates_foreign_key() {
        let (_dir, store) = test_store().await;

        let err = store
            .append_message("missing", Sender::User, "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Constraint(_)), "got: {err:?}");
    }

    #[tokio::test]
    async fn messages_are_scoped_to_their_session() {
        let (_dir, store) = test_store().await;
        store.ensure_session("s1").await.unwrap();
        store.ensure_session("s2").await.unwrap();

        store.append_message("s1", Sender::User, "for s1").await.unwrap();
        store.append_message("s2", Sender::User, "for s2").await.unwrap();

        let s1 = store.list_messages("s1").await.unwrap();
        let s2 = store.list_messages("s2").await.unwrap();
        assert_eq!(s1.len(), 1);
        assert_eq!(s1[0].content, "for s1");
        assert_eq!(s2.len(), 1);
        assert_eq!(s2[0].content, "for s2");
    }
}
