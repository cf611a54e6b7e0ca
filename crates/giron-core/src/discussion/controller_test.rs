use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::discussion::controller::SessionController;
use crate::discussion::event::SessionEvent;
use crate::discussion::model::{Discussion, Message, StopSummary};
use crate::discussion::service::DiscussionService;
use crate::error::{GironError, Result};
use crate::notify::{NotificationLevel, NotificationSink};
use crate::persona::{CreatePersonaRequest, Persona};

const INTERVAL: Duration = Duration::from_secs(5);

// Mock DiscussionService with scripted turn results
struct MockDiscussionService {
    start_error: Mutex<Option<GironError>>,
    next_results: Mutex<VecDeque<Result<Message>>>,
    stop_error: Mutex<Option<GironError>>,
    start_calls: AtomicUsize,
    next_calls: AtomicUsize,
    stop_calls: AtomicUsize,
}

impl MockDiscussionService {
    fn new() -> Self {
        Self {
            start_error: Mutex::new(None),
            next_results: Mutex::new(VecDeque::new()),
            stop_error: Mutex::new(None),
            start_calls: AtomicUsize::new(0),
            next_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
        }
    }

    fn script_messages(&self, count: usize) {
        let mut results = self.next_results.lock().unwrap();
        for i in 0..count {
            results.push_back(Ok(message(i)));
        }
    }

    fn script_error(&self, message: &str) {
        self.next_results
            .lock()
            .unwrap()
            .push_back(Err(GironError::api(message)));
    }

    fn fail_stop(&self) {
        *self.stop_error.lock().unwrap() =
            Some(GironError::api("APIエラー: 500 - 議論の停止に失敗しました"));
    }
}

#[async_trait::async_trait]
impl DiscussionService for MockDiscussionService {
    async fn get_personas(&self) -> Result<Vec<Persona>> {
        Ok(Vec::new())
    }

    async fn create_persona(&self, _request: &CreatePersonaRequest) -> Result<Persona> {
        Err(GironError::internal("not supported by mock"))
    }

    async fn start_discussion(&self, content: &str) -> Result<Discussion> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.start_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(Discussion::new(content))
    }

    async fn next_message(&self) -> Result<Message> {
        self.next_calls.fetch_add(1, Ordering::SeqCst);
        self.next_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GironError::api("APIエラー: 500 - 台本切れ")))
    }

    async fn stop_discussion(&self) -> Result<StopSummary> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.stop_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(StopSummary {
            status: "success".to_string(),
            message_count: 0,
        })
    }
}

// Mock NotificationSink that records everything it is given
#[derive(Default)]
struct RecordingSink {
    notifications: Mutex<Vec<(NotificationLevel, String)>>,
}

impl RecordingSink {
    fn errors(&self) -> Vec<String> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == NotificationLevel::Error)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

fn message(index: usize) -> Message {
    Message {
        persona_name: "戦略家".to_string(),
        content: format!("意見 {index}"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

fn setup() -> (
    Arc<MockDiscussionService>,
    Arc<RecordingSink>,
    Arc<SessionController>,
    mpsc::UnboundedReceiver<SessionEvent>,
) {
    let service = Arc::new(MockDiscussionService::new());
    let sink = Arc::new(RecordingSink::default());
    let (controller, events) =
        SessionController::new(service.clone(), sink.clone(), INTERVAL);
    (service, sink, controller, events)
}

/// Lets spawned timer tasks run without reaching the next armed turn.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

fn drain(events: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}

#[tokio::test(start_paused = true)]
async fn transcript_matches_turn_resolution_order() {
    let (service, sink, controller, _events) = setup();
    service.script_messages(3);
    service.script_error("APIエラー: 500 - 不明なエラーが発生しました");

    controller.start("来期の海外展開戦略").await.unwrap();
    // First turn immediate, then one per interval until the scripted error.
    tokio::time::sleep(Duration::from_secs(30)).await;

    let discussion = controller.discussion().await.unwrap();
    let contents: Vec<_> = discussion
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(contents, ["意見 0", "意見 1", "意見 2"]);
    assert_eq!(service.next_calls.load(Ordering::SeqCst), 4);
    // Loop halted on the failed turn, no retry, no pending timer.
    assert!(!controller.has_pending_turn());
    assert_eq!(sink.errors().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn next_turn_is_noop_when_idle() {
    let (service, _sink, controller, _events) = setup();

    controller.request_next_turn().await;

    assert_eq!(service.next_calls.load(Ordering::SeqCst), 0);
    assert!(!controller.has_pending_turn());
    assert!(controller.discussion().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn next_turn_is_noop_after_session_went_inactive() {
    let (service, _sink, controller, _events) = setup();
    service.script_messages(5);

    controller.start("doc").await.unwrap();
    settle().await;
    controller.stop().await;
    let before = controller.discussion().await.unwrap().message_count();

    controller.request_next_turn().await;

    let after = controller.discussion().await.unwrap().message_count();
    assert_eq!(before, after);
    assert!(!controller.has_pending_turn());
}

#[tokio::test(start_paused = true)]
async fn stop_goes_inactive_even_when_remote_stop_fails() {
    let (service, sink, controller, _events) = setup();
    service.script_messages(1);
    service.fail_stop();

    controller.start("doc").await.unwrap();
    settle().await;

    let summary = controller.stop().await;

    assert!(summary.is_none());
    assert_eq!(service.stop_calls.load(Ordering::SeqCst), 1);
    assert!(!controller.is_active().await);
    assert!(sink.errors().iter().any(|m| m.contains("議論の停止")));
}

#[tokio::test(start_paused = true)]
async fn timer_armed_before_stop_never_appends() {
    let (service, _sink, controller, _events) = setup();
    service.script_messages(10);

    controller.start("doc").await.unwrap();
    settle().await;
    // One immediate turn has landed and the next is armed for +5s.
    assert_eq!(controller.discussion().await.unwrap().message_count(), 1);
    assert!(controller.has_pending_turn());

    controller.stop().await;
    tokio::time::sleep(Duration::from_secs(20)).await;

    let discussion = controller.discussion().await.unwrap();
    assert_eq!(discussion.message_count(), 1);
    assert!(!discussion.is_active);
    assert_eq!(service.next_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn blank_document_never_reaches_the_network() {
    let (service, sink, controller, _events) = setup();

    let result = controller.start("   \n\t ").await;

    assert!(matches!(result, Err(GironError::EmptyDocument)));
    assert_eq!(service.start_calls.load(Ordering::SeqCst), 0);
    assert!(controller.discussion().await.is_none());
    assert!(!controller.has_pending_turn());
    assert_eq!(sink.errors().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_start_keeps_prior_state() {
    let (service, sink, controller, _events) = setup();
    *service.start_error.lock().unwrap() =
        Some(GironError::api("議論の開始に失敗しました"));

    let result = controller.start("doc").await;

    assert!(result.is_err());
    assert!(controller.discussion().await.is_none());
    assert!(!controller.has_pending_turn());
    assert_eq!(sink.errors(), ["議論の開始に失敗しました"]);
}

#[tokio::test(start_paused = true)]
async fn start_next_stop_scenario() {
    let (service, _sink, controller, mut events) = setup();
    service.script_messages(1);

    controller.start("新規事業の戦略文書").await.unwrap();
    let discussion = controller.discussion().await.unwrap();
    assert!(discussion.is_active);
    assert_eq!(discussion.message_count(), 0);

    settle().await;
    let discussion = controller.discussion().await.unwrap();
    assert_eq!(discussion.message_count(), 1);
    assert_eq!(discussion.messages[0].persona_name, "戦略家");

    controller.stop().await;
    let discussion = controller.discussion().await.unwrap();
    assert!(!discussion.is_active);
    assert_eq!(discussion.message_count(), 1);

    let drained = drain(&mut events);
    assert!(matches!(drained.first(), Some(SessionEvent::Started { .. })));
    assert!(matches!(drained.last(), Some(SessionEvent::Stopped)));
}

#[tokio::test(start_paused = true)]
async fn failed_turn_halts_loop_and_notifies_once() {
    let (service, sink, controller, mut events) = setup();
    service.script_error("APIエラー: 500 - Internal Server Error");

    controller.start("doc").await.unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;

    let discussion = controller.discussion().await.unwrap();
    assert_eq!(discussion.message_count(), 0);
    assert!(!controller.has_pending_turn());
    assert_eq!(service.next_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        sink.errors(),
        ["APIエラー: 500 - Internal Server Error"]
    );

    let failures = drain(&mut events)
        .into_iter()
        .filter(|e| matches!(e, SessionEvent::TurnFailed { .. }))
        .count();
    assert_eq!(failures, 1);
}

#[tokio::test(start_paused = true)]
async fn double_start_leaves_a_single_live_timer() {
    let (service, _sink, controller, _events) = setup();
    service.script_messages(10);

    // Double-click: two starts with no time in between.
    controller.start("doc").await.unwrap();
    controller.start("doc").await.unwrap();
    settle().await;

    // Exactly one loop survives: one appended turn per interval.
    let baseline = controller.discussion().await.unwrap().message_count();
    tokio::time::sleep(INTERVAL + Duration::from_millis(100)).await;
    let after_one = controller.discussion().await.unwrap().message_count();
    assert_eq!(after_one, baseline + 1);

    tokio::time::sleep(INTERVAL).await;
    let after_two = controller.discussion().await.unwrap().message_count();
    assert_eq!(after_two, baseline + 2);
}

#[tokio::test(start_paused = true)]
async fn reset_returns_transcript_and_clears_state() {
    let (service, _sink, controller, _events) = setup();
    service.script_messages(1);

    controller.start("doc").await.unwrap();
    settle().await;

    let discarded = controller.reset().await.unwrap();
    assert_eq!(discarded.message_count(), 1);
    assert!(controller.discussion().await.is_none());
    assert!(controller.document_text().await.is_empty());
    assert!(!controller.has_pending_turn());
}
