//! Discussion session controller.
//!
//! The single owner of the discussion state and the scheduler handle.
//! All mutation goes through here; rendering code observes the session
//! through cloned snapshots and [`SessionEvent`]s.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, mpsc};

use super::event::SessionEvent;
use super::model::{Discussion, StopSummary};
use super::scheduler::TurnScheduler;
use super::service::DiscussionService;
use crate::error::{GironError, Result};
use crate::notify::NotificationSink;

#[derive(Default)]
struct SessionState {
    /// The current discussion, if one was started.
    discussion: Option<Discussion>,
    /// The document text the current discussion was started from.
    document_text: String,
}

/// Owns one discussion session and its turn loop.
///
/// Lifecycle: `Idle → Active → (tick → append → re-arm)* → Stopped`,
/// back to `Idle` only via [`reset`](Self::reset). While active, the
/// controller keeps exactly one pending turn armed; each fired turn
/// re-reads the shared state, so a turn that lands after a stop
/// becomes a no-op instead of resurrecting the loop.
///
/// Failure semantics: a failed start leaves the prior state untouched;
/// a failed turn halts the loop (no automatic retry); a failed remote
/// stop is reported but never blocks the local transition to inactive.
/// Every failure is surfaced through the injected [`NotificationSink`]
/// before the erring operation returns.
pub struct SessionController {
    service: Arc<dyn DiscussionService>,
    notifier: Arc<dyn NotificationSink>,
    state: RwLock<SessionState>,
    scheduler: TurnScheduler,
    turn_interval: Duration,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionController {
    /// Creates a controller and the event stream front-ends subscribe to.
    pub fn new(
        service: Arc<dyn DiscussionService>,
        notifier: Arc<dyn NotificationSink>,
        turn_interval: Duration,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let controller = Arc::new(Self {
            service,
            notifier,
            state: RwLock::new(SessionState::default()),
            scheduler: TurnScheduler::new(),
            turn_interval,
            events,
        });
        (controller, receiver)
    }

    /// Starts a discussion over `document_text` and arms the first turn.
    ///
    /// Empty or whitespace-only input is rejected before any network
    /// call. On any error the prior session state is left unchanged;
    /// the error has already been reported through the notification
    /// sink when this returns.
    pub async fn start(self: &Arc<Self>, document_text: &str) -> Result<()> {
        if document_text.trim().is_empty() {
            let err = GironError::EmptyDocument;
            self.notifier.error(&err.to_string());
            return Err(err);
        }

        match self.service.start_discussion(document_text).await {
            Ok(discussion) => {
                let seeded_messages = discussion.message_count();
                {
                    let mut state = self.state.write().await;
                    state.document_text = document_text.to_string();
                    state.discussion = Some(discussion);
                }
                self.emit(SessionEvent::Started { seeded_messages });
                // First turn fires immediately; arming supersedes any
                // timer left over from a previous start.
                self.arm_turn(Duration::ZERO);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("discussion start failed: {err}");
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }

    /// Requests the next persona turn and appends it to the transcript.
    ///
    /// No-op (clearing any pending handle) when there is no active
    /// discussion. On success re-arms exactly one future turn; on
    /// failure reports the error once and halts the loop.
    pub async fn request_next_turn(self: &Arc<Self>) {
        // Fire-time guard: consult current shared state, never a
        // snapshot captured when the timer was armed.
        if !self.is_active().await {
            self.scheduler.cancel();
            return;
        }

        match self.service.next_message().await {
            Ok(message) => {
                let mut state = self.state.write().await;
                // The session may have stopped while the call was in
                // flight; a late result is discarded, not appended.
                match state.discussion.as_mut().filter(|d| d.is_active) {
                    Some(discussion) => {
                        discussion.append(message.clone());
                        drop(state);
                        self.emit(SessionEvent::MessageAppended { message });
                        self.arm_turn(self.turn_interval);
                    }
                    None => {
                        drop(state);
                        self.scheduler.cancel();
                    }
                }
            }
            Err(err) => {
                tracing::warn!("turn request failed: {err}");
                self.notifier.error(&err.to_string());
                self.emit(SessionEvent::TurnFailed {
                    error: err.to_string(),
                });
                // Halt rather than retry: clear the handle slot so no
                // pending turn remains.
                self.scheduler.cancel();
            }
        }
    }

    /// Stops the session.
    ///
    /// The pending turn is cancelled before anything else, then the
    /// local state goes inactive, then the remote stop is attempted.
    /// A remote failure is reported but the session stays stopped:
    /// local state always reflects user intent.
    pub async fn stop(self: &Arc<Self>) -> Option<StopSummary> {
        self.scheduler.cancel();

        {
            let mut state = self.state.write().await;
            let Some(discussion) = state.discussion.as_mut() else {
                return None;
            };
            discussion.is_active = false;
        }

        let summary = match self.service.stop_discussion().await {
            Ok(summary) => Some(summary),
            Err(err) => {
                tracing::warn!("remote stop failed: {err}");
                self.notifier.error(&err.to_string());
                None
            }
        };

        self.emit(SessionEvent::Stopped);
        summary
    }

    /// Discards the session and clears the input document.
    ///
    /// Returns the discarded discussion so the caller can export the
    /// transcript (a local side-channel outside this controller).
    pub async fn reset(self: &Arc<Self>) -> Option<Discussion> {
        self.scheduler.cancel();
        let mut state = self.state.write().await;
        state.document_text.clear();
        state.discussion.take()
    }

    /// Snapshot of the current discussion, if any.
    pub async fn discussion(&self) -> Option<Discussion> {
        self.state.read().await.discussion.clone()
    }

    /// Whether a discussion exists and still accepts turns.
    pub async fn is_active(&self) -> bool {
        self.state
            .read()
            .await
            .discussion
            .as_ref()
            .is_some_and(|d| d.is_active)
    }

    /// The document text the current session was started from.
    pub async fn document_text(&self) -> String {
        self.state.read().await.document_text.clone()
    }

    /// Whether a turn is currently armed.
    pub fn has_pending_turn(&self) -> bool {
        self.scheduler.has_pending()
    }

    fn arm_turn(self: &Arc<Self>, delay: Duration) {
        let controller = Arc::clone(self);
        self.scheduler.arm(delay, async move {
            controller.request_next_turn().await;
        });
    }

    fn emit(&self, event: SessionEvent) {
        // Best-effort: a departed receiver must not fail the loop.
        let _ = self.events.send(event);
    }
}
