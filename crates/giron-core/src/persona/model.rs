//! Persona domain model.
//!
//! Represents the simulated participants of a discussion. Each persona
//! has a stance and a speaking style the service uses when generating
//! that persona's turns; the client only labels and displays them.

use serde::{Deserialize, Serialize};

/// A configured discussion participant.
///
/// Loaded from the discussion service at session start and not mutated
/// by the turn loop. A separate registration flow
/// ([`CreatePersonaRequest`](super::CreatePersonaRequest)) adds new ones.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Display name of the persona
    pub name: String,
    /// Role or title describing the persona's expertise
    pub role: String,
    /// Stance toward the document (賛成派, 中立派, 懐疑派, ...)
    pub position: String,
    /// Speaking-style characteristics
    pub speaking_style: String,
    /// Optional visual icon/emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Optional reference to an uploaded portrait image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Persona {
    /// Icon to display for this persona, falling back to a generic one.
    pub fn display_icon(&self) -> &str {
        self.icon.as_deref().unwrap_or("👤")
    }
}
