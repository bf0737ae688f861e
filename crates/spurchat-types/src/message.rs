//! Session and message types for the chat relay.
//!
//! Sessions group an ordered sequence of messages; messages are one turn
//! of a conversation, tagged by who sent them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who produced a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('user', 'ai'))`
///
/// The client renders a third `error` display state for failed requests,
/// but that state is never persisted and has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Ai => write!(f, "ai"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "ai" => Ok(Sender::Ai),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single persisted message within a session.
///
/// Session ids are caller-supplied opaque tokens (the browser client
/// generates a random one per conversation); sessions themselves carry no
/// state beyond their row, so no session struct exists here.
///
/// Messages are append-only and ordered by `created_at` within a session,
/// with the time-sortable v7 `id` as tie-breaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: Uuid,
    pub session_id: String,
    pub sender: Sender,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Ai] {
            let s = sender.to_string();
            let parsed: Sender = s.parse().unwrap();
            assert_eq!(sender, parsed);
        }
    }

    #[test]
    fn test_sender_serde() {
        let sender = Sender::Ai;
        let json = serde_json::to_string(&sender).unwrap();
        assert_eq!(json, "\"ai\"");
        let parsed: Sender = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Sender::Ai);
    }

    #[test]
    fn test_sender_rejects_error_tag() {
        // `error` is a client-only display state, never a valid stored sender.
        assert!("error".parse::<Sender>().is_err());
    }

    #[test]
    fn test_stored_message_serialize() {
        let message = StoredMessage {
            id: Uuid::now_v7(),
            session_id: "s1".to_string(),
            sender: Sender::User,
            content: "Do you ship to Canada?".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"sender\":\"user\""));
        assert!(json.contains("Do you ship to Canada?"));
    }
}
