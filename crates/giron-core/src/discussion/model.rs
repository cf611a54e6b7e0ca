//! Discussion domain model.
//!
//! A discussion is one user-initiated session: a source strategy
//! document plus an append-only transcript of persona turns. The shapes
//! here mirror the discussion service's wire contract exactly.

use serde::{Deserialize, Serialize};

/// The document the personas discuss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDocument {
    /// Full document text as submitted by the user.
    pub content: String,
}

/// One persona turn in the transcript.
///
/// Immutable once appended. The timestamp is an ISO-8601 string
/// produced by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Name of the persona that produced this turn.
    pub persona_name: String,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

/// A discussion session as held in memory and on the wire.
///
/// `messages` is append-only; insertion order is presentation order.
/// `is_active` is true from a successful start until the session is
/// stopped locally or remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    /// The document under discussion.
    pub strategy_document: StrategyDocument,
    /// Ordered transcript of persona turns.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Whether the session accepts further turns.
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl Discussion {
    /// Creates a fresh active discussion with an empty transcript.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            strategy_document: StrategyDocument {
                content: content.into(),
            },
            messages: Vec::new(),
            is_active: true,
        }
    }

    /// Appends one turn to the transcript, preserving insertion order.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Number of turns taken so far.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// Result of the remote stop operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopSummary {
    /// Service-reported status string.
    pub status: String,
    /// Transcript length at the moment the service stopped the session.
    pub message_count: usize,
}
