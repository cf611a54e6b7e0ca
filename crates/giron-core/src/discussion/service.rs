//! Discussion service trait.
//!
//! Defines the interface to the external discussion service, decoupling
//! the session controller from the HTTP transport.

use super::model::{Discussion, Message, StopSummary};
use crate::error::Result;
use crate::persona::{CreatePersonaRequest, Persona};

/// An abstract client for the external discussion service.
///
/// Implementations translate these operations into remote calls and
/// report every remote failure as [`GironError::Api`]. No retries are
/// performed here; retry policy (or the deliberate absence of one)
/// belongs to the caller.
///
/// [`GironError::Api`]: crate::error::GironError::Api
#[async_trait::async_trait]
pub trait DiscussionService: Send + Sync {
    /// Retrieves the current persona roster.
    async fn get_personas(&self) -> Result<Vec<Persona>>;

    /// Registers a new persona (multipart upload for the optional image).
    async fn create_persona(&self, request: &CreatePersonaRequest) -> Result<Persona>;

    /// Starts a discussion over the given document text.
    ///
    /// The service may seed the returned discussion with a first turn.
    async fn start_discussion(&self, content: &str) -> Result<Discussion>;

    /// Asks the service for the next persona's turn.
    async fn next_message(&self) -> Result<Message>;

    /// Stops the active discussion on the service side.
    async fn stop_discussion(&self) -> Result<StopSummary>;
}
