//! Turn scheduler.
//!
//! A self-rescheduling, cancellable timer for the discussion loop.
//! Invariant: at most one pending turn is armed at any time; arming a
//! new turn supersedes (cancels) the previous one.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Schedules at most one future turn at a time.
///
/// The pending turn is represented by a [`CancellationToken`]; owning
/// exactly one slot makes the double-arm race (two live timers after a
/// double-click start) impossible. Cancellation only interrupts the
/// delay: a turn whose delay already elapsed runs to completion and is
/// expected to consult current session state itself.
///
/// Every fired turn must leave the slot consistent: either re-arm
/// (which replaces the slot) or call [`cancel`](Self::cancel) to clear
/// it, so [`has_pending`](Self::has_pending) stays truthful.
pub struct TurnScheduler {
    pending: Mutex<Option<CancellationToken>>,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
        }
    }

    /// Arms one future turn, superseding any pending one.
    ///
    /// `fire` runs after `delay` unless the turn is cancelled first.
    pub fn arm<F>(&self, delay: Duration, fire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let armed = token.clone();

        // Replace-then-cancel keeps the single-live-handle invariant:
        // the old timer observes its token cancelled and never fires.
        let previous = self.pending.lock().unwrap().replace(token);
        if let Some(previous) = previous {
            previous.cancel();
        }

        tokio::spawn(async move {
            tokio::select! {
                _ = armed.cancelled() => {}
                _ = tokio::time::sleep(delay) => fire.await,
            }
        });
    }

    /// Synchronously cancels the pending turn, if any.
    pub fn cancel(&self) {
        if let Some(token) = self.pending.lock().unwrap().take() {
            token.cancel();
        }
    }

    /// Whether a turn is currently armed.
    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new()
    }
}
