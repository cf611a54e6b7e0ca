//! Session events published to the front-end.

use serde::{Deserialize, Serialize};

use super::model::Message;

/// High-level events emitted by the session controller.
///
/// Rendering code subscribes to these instead of polling the transcript.
/// Delivery is best-effort: once the receiver is gone the controller
/// keeps running and silently drops events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A discussion became active, possibly with a seeded transcript.
    Started { seeded_messages: usize },
    /// One turn was appended to the transcript.
    MessageAppended { message: Message },
    /// A turn request failed and the loop halted.
    TurnFailed { error: String },
    /// The session is no longer active.
    Stopped,
}
