//! User-visible notification channel.
//!
//! The session controller receives a [`NotificationSink`] by dependency
//! injection instead of writing to a process-global handler, so every
//! front-end (CLI, tests) decides for itself how to present messages.

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A channel for user-visible messages.
///
/// Implementations must be cheap and non-blocking; the controller calls
/// this inline from the turn loop.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str);

    fn info(&self, message: &str) {
        self.notify(NotificationLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.notify(NotificationLevel::Error, message);
    }
}

/// Default sink that forwards notifications to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Info => tracing::info!("{message}"),
            NotificationLevel::Error => tracing::error!("{message}"),
        }
    }
}
