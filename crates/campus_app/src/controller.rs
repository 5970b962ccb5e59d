use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::anyhow;
use campus_domain::{ChatRequest, ChatService, ChatSessionId, ConversationTurn, Transcript};
use tracing::{debug, error, info};

use crate::Confirm;

pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again.";
pub const NEW_CONVERSATION_PROMPT: &str = "Start a new conversation?";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    InFlight,
}

/// Outcome of [`ConversationController::submit_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Nothing was sent and the transcript is unchanged.
    Rejected(RejectReason),
    /// The assistant's reply was appended.
    Answered,
    /// The request failed; the fallback reply was appended.
    Failed,
}

#[derive(Debug, Default)]
struct ConversationState {
    transcript: Transcript,
    session_id: Option<ChatSessionId>,
}

/// Releases the in-flight flag even when the send future is dropped midway.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Turn-taking with the assistant: owns the transcript, the backend session
/// id and the single outstanding request.
pub struct ConversationController<S> {
    service: Arc<S>,
    state: Mutex<ConversationState>,
    in_flight: AtomicBool,
    timeout: Duration,
}

impl<S: ChatService> ConversationController<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            state: Mutex::new(ConversationState::default()),
            in_flight: AtomicBool::new(false),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn state(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn claim(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(&self.in_flight))
    }

    /// Sends one user turn and appends the reply.
    ///
    /// The user turn is appended before the request is issued and is kept
    /// whatever the outcome. Failures never escape: they become the fixed
    /// fallback reply.
    pub async fn submit_message(&self, text: &str) -> Submission {
        let message = text.trim();
        if message.is_empty() {
            return Submission::Rejected(RejectReason::Empty);
        }

        let Some(_in_flight) = self.claim() else {
            debug!("Ignoring message while a reply is pending");
            return Submission::Rejected(RejectReason::InFlight);
        };

        let request = {
            let mut state = self.state();
            state.transcript.push(ConversationTurn::user(message));
            ChatRequest::new(message).session_id(state.session_id.clone())
        };

        debug!(session_id = ?request.session_id, "Sending chat turn");
        let outcome = match tokio::time::timeout(self.timeout, self.service.chat(&request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(anyhow!("No reply within {}s", self.timeout.as_secs())),
        };

        let mut state = self.state();
        match outcome {
            Ok(response) => {
                if state.session_id.is_none()
                    && let Some(session_id) = response.session_id
                {
                    info!(%session_id, "Conversation session started");
                    state.session_id = Some(session_id);
                }
                state.transcript.push(ConversationTurn::assistant(
                    response.message.unwrap_or_default(),
                    response.function_results,
                ));
                Submission::Answered
            }
            Err(error) => {
                error!(?error, "Chat turn failed");
                state
                    .transcript
                    .push(ConversationTurn::assistant(FALLBACK_REPLY, None));
                Submission::Failed
            }
        }
    }

    /// Discards the transcript and session id after confirmation. Refused
    /// while a reply is pending so it cannot land in the new conversation.
    /// Holds the in-flight slot until done, so no send can start midway.
    /// The backend is not told.
    pub fn reset_conversation(&self, confirm: &dyn Confirm) -> bool {
        let Some(_in_flight) = self.claim() else {
            return false;
        };
        if !self.is_empty() && !confirm.confirm(NEW_CONVERSATION_PROMPT) {
            return false;
        }

        let mut state = self.state();
        state.transcript.clear();
        state.session_id = None;
        true
    }

    pub fn transcript(&self) -> Vec<ConversationTurn> {
        self.state().transcript.turns().to_vec()
    }

    pub fn len(&self) -> usize {
        self.state().transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().transcript.is_empty()
    }

    pub fn session_id(&self) -> Option<ChatSessionId> {
        self.state().session_id.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use anyhow::anyhow;
    use campus_domain::{ChatResponse, FunctionResult, TurnRole};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio::sync::Notify;

    use super::*;
    use crate::render_all;

    /// Replays scripted replies and records every request.
    #[derive(Default)]
    struct ScriptedChat {
        replies: Mutex<VecDeque<anyhow::Result<ChatResponse>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedChat {
        fn reply(self, reply: anyhow::Result<ChatResponse>) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ChatService for ScriptedChat {
        async fn chat(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow!("no scripted reply")))
        }
    }

    /// Blocks every request until released.
    #[derive(Default)]
    struct GatedChat {
        entered: Notify,
        release: Notify,
    }

    #[async_trait::async_trait]
    impl ChatService for GatedChat {
        async fn chat(&self, _: &ChatRequest) -> anyhow::Result<ChatResponse> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(ChatResponse { message: Some("done".to_string()), ..Default::default() })
        }
    }

    /// Never answers.
    struct SilentChat;

    #[async_trait::async_trait]
    impl ChatService for SilentChat {
        async fn chat(&self, _: &ChatRequest) -> anyhow::Result<ChatResponse> {
            std::future::pending().await
        }
    }

    fn postings_reply() -> ChatResponse {
        serde_json::from_value(json!({
            "message": "here",
            "sessionId": "abc123",
            "functionResults": [
                {"functionName": "get_posting_list", "data": {"content": [{"id": 1, "title": "X"}]}}
            ]
        }))
        .unwrap()
    }

    fn text_reply(message: &str, session_id: Option<&str>) -> ChatResponse {
        ChatResponse {
            message: Some(message.to_string()),
            session_id: session_id.map(ChatSessionId::new),
            function_results: None,
        }
    }

    #[tokio::test]
    async fn test_first_turn_adopts_session_and_renders_cards() {
        let service = Arc::new(ScriptedChat::default().reply(Ok(postings_reply())));
        let fixture = ConversationController::new(service.clone());

        let actual = fixture.submit_message("show postings").await;

        assert_eq!(actual, Submission::Answered);
        let transcript = fixture.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0], ConversationTurn::user("show postings"));
        assert_eq!(transcript[1].role, TurnRole::Assistant);
        assert_eq!(transcript[1].content, "here");
        assert_eq!(fixture.session_id(), Some(ChatSessionId::new("abc123")));
        assert_eq!(service.requests()[0].session_id, None);

        let cards = render_all(transcript[1].function_results());
        assert_eq!(cards.len(), 1);
        assert!(matches!(
            &cards[0],
            campus_domain::Card::PostingList(postings) if postings.len() == 1 && postings[0].id == Some(1)
        ));
    }

    #[tokio::test]
    async fn test_second_turn_echoes_session_id() {
        let service = Arc::new(
            ScriptedChat::default()
                .reply(Ok(postings_reply()))
                .reply(Ok(text_reply("ok", Some("other")))),
        );
        let fixture = ConversationController::new(service.clone());

        fixture.submit_message("show postings").await;
        fixture.submit_message("apply to 1").await;

        let requests = service.requests();
        assert_eq!(requests[1].session_id, Some(ChatSessionId::new("abc123")));
        assert_eq!(
            serde_json::to_value(&requests[1]).unwrap(),
            json!({"message": "apply to 1", "sessionId": "abc123"})
        );
        // A later id from the backend does not replace the adopted one.
        assert_eq!(fixture.session_id(), Some(ChatSessionId::new("abc123")));
    }

    #[tokio::test]
    async fn test_failure_appends_fallback_and_allows_retry() {
        let service = Arc::new(
            ScriptedChat::default()
                .reply(Err(anyhow!("connection refused")))
                .reply(Ok(text_reply("back", Some("s1")))),
        );
        let fixture = ConversationController::new(service);

        let actual = fixture.submit_message("hello").await;

        assert_eq!(actual, Submission::Failed);
        assert_eq!(
            fixture.transcript(),
            vec![
                ConversationTurn::user("hello"),
                ConversationTurn::assistant(FALLBACK_REPLY, None),
            ]
        );
        assert!(!fixture.is_in_flight());
        assert_eq!(fixture.session_id(), None);

        let retry = fixture.submit_message("hello again").await;

        assert_eq!(retry, Submission::Answered);
        assert_eq!(fixture.len(), 4);
    }

    #[tokio::test]
    async fn test_blank_message_is_ignored() {
        let service = Arc::new(ScriptedChat::default());
        let fixture = ConversationController::new(service.clone());

        let actual = fixture.submit_message("   \n").await;

        assert_eq!(actual, Submission::Rejected(RejectReason::Empty));
        assert!(fixture.is_empty());
        assert!(service.requests().is_empty());
    }

    #[tokio::test]
    async fn test_message_is_trimmed() {
        let service = Arc::new(ScriptedChat::default().reply(Ok(text_reply("hi", None))));
        let fixture = ConversationController::new(service.clone());

        fixture.submit_message("  hi there  ").await;

        assert_eq!(service.requests()[0].message, "hi there");
        assert_eq!(fixture.transcript()[0].content, "hi there");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_second_send_while_in_flight_is_rejected() {
        let service = Arc::new(GatedChat::default());
        let fixture = Arc::new(ConversationController::new(service.clone()));

        let first = tokio::spawn({
            let fixture = fixture.clone();
            async move { fixture.submit_message("first").await }
        });
        service.entered.notified().await;

        let second = fixture.submit_message("second").await;

        assert_eq!(second, Submission::Rejected(RejectReason::InFlight));
        assert!(fixture.is_in_flight());
        assert_eq!(fixture.len(), 1);
        assert!(!fixture.reset_conversation(&|_: &str| true));

        service.release.notify_one();
        let first = first.await.unwrap();

        assert_eq!(first, Submission::Answered);
        assert!(!fixture.is_in_flight());
        assert_eq!(
            fixture.transcript(),
            vec![
                ConversationTurn::user("first"),
                ConversationTurn::assistant("done", None),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_a_failure() {
        let fixture =
            ConversationController::new(Arc::new(SilentChat)).timeout(Duration::from_secs(5));

        let actual = fixture.submit_message("anyone?").await;

        assert_eq!(actual, Submission::Failed);
        assert_eq!(fixture.transcript()[1].content, FALLBACK_REPLY);
        assert!(!fixture.is_in_flight());
    }

    #[tokio::test]
    async fn test_dropped_send_releases_flag() {
        let fixture = ConversationController::new(Arc::new(SilentChat));

        let pending = fixture.submit_message("lost");
        let _ = tokio::time::timeout(Duration::from_millis(10), pending).await;

        assert!(!fixture.is_in_flight());
        assert_eq!(fixture.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_requires_confirmation() {
        let service = Arc::new(ScriptedChat::default().reply(Ok(postings_reply())));
        let fixture = ConversationController::new(service);
        fixture.submit_message("show postings").await;

        let declined = fixture.reset_conversation(&|_: &str| false);

        assert!(!declined);
        assert_eq!(fixture.len(), 2);
        assert!(fixture.session_id().is_some());

        let accepted = fixture.reset_conversation(&|prompt: &str| {
            prompt == NEW_CONVERSATION_PROMPT
        });

        assert!(accepted);
        assert!(fixture.is_empty());
        assert_eq!(fixture.session_id(), None);
    }

    #[tokio::test]
    async fn test_reset_after_clear_omits_session_id() {
        let service = Arc::new(
            ScriptedChat::default()
                .reply(Ok(postings_reply()))
                .reply(Ok(text_reply("fresh", Some("xyz")))),
        );
        let fixture = ConversationController::new(service.clone());
        fixture.submit_message("one").await;
        fixture.reset_conversation(&|_: &str| true);

        fixture.submit_message("two").await;

        assert_eq!(service.requests()[1].session_id, None);
        assert_eq!(fixture.session_id(), Some(ChatSessionId::new("xyz")));
    }

    #[test]
    fn test_reset_of_empty_conversation_skips_prompt() {
        let fixture = ConversationController::new(Arc::new(ScriptedChat::default()));

        let actual = fixture.reset_conversation(&|_: &str| -> bool {
            panic!("should not prompt")
        });

        assert!(actual);
    }

    #[tokio::test]
    async fn test_reset_holds_in_flight_slot() {
        let service = Arc::new(ScriptedChat::default().reply(Ok(postings_reply())));
        let fixture = ConversationController::new(service.clone());
        fixture.submit_message("show postings").await;

        let accepted = fixture.reset_conversation(&|_: &str| {
            assert!(fixture.is_in_flight());
            true
        });

        assert!(accepted);
        assert!(!fixture.is_in_flight());
        assert!(fixture.is_empty());
        assert_eq!(service.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unnamed_function_result_keeps_reply_text() {
        let reply: ChatResponse = serde_json::from_value(json!({
            "message": "Applied!",
            "sessionId": "s1",
            "functionResults": [{"functionName": null, "data": {"ok": true}}]
        }))
        .unwrap();
        let service = Arc::new(ScriptedChat::default().reply(Ok(reply)));
        let fixture = ConversationController::new(service);

        let actual = fixture.submit_message("apply to 3").await;

        assert_eq!(actual, Submission::Answered);
        let transcript = fixture.transcript();
        assert_eq!(transcript[1].content, "Applied!");
        assert_eq!(
            render_all(transcript[1].function_results()),
            vec![campus_domain::Card::Raw(json!({"ok": true}))]
        );
    }

    #[test]
    fn test_assistant_turn_with_cards_only() {
        let results = vec![FunctionResult::new("get_user_info", json!({"id": 1}))];
        let turn = ConversationTurn::assistant("", Some(results));
        assert!(turn.content.is_empty());
        assert_eq!(render_all(turn.function_results()).len(), 1);
    }
}
