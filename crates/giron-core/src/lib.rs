//! Giron core: persona-discussion session engine.
//!
//! Owns the domain models, the session controller with its turn-taking
//! scheduler, and the trait seams (`DiscussionService`,
//! `NotificationSink`) that transports and front-ends plug into.

pub mod discussion;
pub mod error;
pub mod export;
pub mod notify;
pub mod persona;

// Re-export common error type
pub use error::GironError;
