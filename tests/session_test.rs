//! Session controller behavior against scripted providers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use p2p_assist::app::{App, ConnectionStatus};
use p2p_assist::llm::{
    GenerateRequest, LlmClient, LlmProvider, Provider, ProviderError, ProviderResult,
};
use p2p_assist::message::Role;
use p2p_assist::prompt;
use p2p_assist::session::{AssistantSession, APOLOGY_REPLY, FALLBACK_REPLY, GREETING};

/// Provider that returns a fixed outcome and records what it was asked.
struct ScriptedProvider {
    outcome: ProviderResult<Option<String>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    fn new(outcome: ProviderResult<Option<String>>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn replying(text: &str) -> Self {
        Self::new(Ok(Some(text.to_string())))
    }

    fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn model(&self) -> &str {
        "scripted"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, request: GenerateRequest) -> ProviderResult<Option<String>> {
        self.requests.lock().unwrap().push(request);
        self.outcome.clone()
    }
}

/// Provider that holds every request until released.
struct GatedProvider {
    gate: Arc<Notify>,
}

#[async_trait]
impl LlmProvider for GatedProvider {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn model(&self) -> &str {
        "gated"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, _request: GenerateRequest) -> ProviderResult<Option<String>> {
        self.gate.notified().await;
        Ok(Some("released".to_string()))
    }
}

/// Provider whose task dies before answering.
struct PanickingProvider;

#[async_trait]
impl LlmProvider for PanickingProvider {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn model(&self) -> &str {
        "panicking"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, _request: GenerateRequest) -> ProviderResult<Option<String>> {
        panic!("transport blew up");
    }
}

async fn wait_for_reply(app: &mut App) {
    for _ in 0..1000 {
        app.process_reply();
        if !app.is_pending() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("reply never arrived");
}

// ============================================
// AssistantSession::submit
// ============================================

#[test]
fn fresh_session_has_only_the_greeting() {
    let session = AssistantSession::new();

    assert_eq!(session.transcript().len(), 1);
    assert_eq!(session.transcript()[0].role, Role::Assistant);
    assert_eq!(session.transcript()[0].content, GREETING);
    assert!(!session.is_pending());
    assert_eq!(session.draft(), "");
}

#[tokio::test]
async fn submit_uk_question_records_both_turns() {
    let provider = ScriptedProvider::replying("That would be £80.");
    let mut session = AssistantSession::new();

    let accepted = session
        .submit("How much to ship 5kg from UK?", &provider)
        .await;

    assert!(accepted);
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].role, Role::User);
    assert_eq!(transcript[1].content, "How much to ship 5kg from UK?");
    assert_eq!(transcript[2].role, Role::Assistant);
    assert_eq!(transcript[2].content, "That would be £80.");
    assert!(!session.is_pending());
}

#[tokio::test]
async fn submit_sends_raw_text_and_grounded_instruction() {
    let provider = ScriptedProvider::replying("ok");
    let mut session = AssistantSession::new();

    session.submit("  3 lbs from New Jersey? ", &provider).await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query, "  3 lbs from New Jersey? ");
    assert_eq!(requests[0].system_instruction, prompt::system_instruction());
    assert!(requests[0].system_instruction.contains("0 - 5 lbs: $45"));
}

#[tokio::test]
async fn blank_submissions_are_noops() {
    let provider = ScriptedProvider::replying("unused");
    let mut session = AssistantSession::new();

    assert!(!session.submit("", &provider).await);
    assert!(!session.submit("   ", &provider).await);
    assert!(!session.submit("\n\t", &provider).await);

    assert_eq!(session.transcript().len(), 1);
    assert!(!session.is_pending());
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn transcript_grows_by_two_per_accepted_submission() {
    let provider = ScriptedProvider::replying("sure");
    let mut session = AssistantSession::new();

    for n in 1..=4 {
        session.submit(&format!("question {}", n), &provider).await;
        assert_eq!(session.transcript().len(), 1 + 2 * n);
        assert!(!session.is_pending());
    }
    assert_eq!(session.questions_asked(), 4);
}

#[tokio::test]
async fn absent_text_uses_fallback() {
    let provider = ScriptedProvider::new(Ok(None));
    let mut session = AssistantSession::new();

    session.submit("hello", &provider).await;

    assert_eq!(session.transcript()[2].content, FALLBACK_REPLY);
    assert!(!session.is_pending());
}

#[tokio::test]
async fn empty_text_uses_fallback() {
    let provider = ScriptedProvider::new(Ok(Some(String::new())));
    let mut session = AssistantSession::new();

    session.submit("hello", &provider).await;

    assert_eq!(session.transcript()[2].content, FALLBACK_REPLY);
}

#[tokio::test]
async fn provider_errors_become_the_apology() {
    let errors = [
        ProviderError::NetworkError("connection reset".to_string()),
        ProviderError::ApiError {
            status: 500,
            message: "internal".to_string(),
        },
        ProviderError::InvalidResponse("not json".to_string()),
        ProviderError::NotConfigured("no key".to_string()),
    ];

    for err in errors {
        let provider = ScriptedProvider::new(Err(err));
        let mut session = AssistantSession::new();

        assert!(session.submit("hello", &provider).await);

        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript()[2].content, APOLOGY_REPLY);
        assert!(!session.is_pending());
    }
}

#[tokio::test]
async fn session_stays_usable_after_failure() {
    let failing = ScriptedProvider::new(Err(ProviderError::NetworkError("down".to_string())));
    let working = ScriptedProvider::replying("back online");
    let mut session = AssistantSession::new();

    session.submit("first", &failing).await;
    session.submit("second", &working).await;

    assert_eq!(session.transcript().len(), 5);
    assert_eq!(session.transcript()[2].content, APOLOGY_REPLY);
    assert_eq!(session.transcript()[4].content, "back online");
}

#[tokio::test]
async fn abandoned_submit_settles_with_apology() {
    let stalled = GatedProvider {
        gate: Arc::new(Notify::new()),
    };
    let working = ScriptedProvider::replying("£30");
    let mut session = AssistantSession::new();

    let result = tokio::time::timeout(
        Duration::from_millis(20),
        session.submit("anyone there?", &stalled),
    )
    .await;
    assert!(result.is_err());

    assert!(!session.is_pending());
    assert_eq!(session.transcript().len(), 3);
    assert_eq!(session.transcript()[2].role, Role::Assistant);
    assert_eq!(session.transcript()[2].content, APOLOGY_REPLY);

    assert!(session.submit("2kg from UK?", &working).await);
    assert_eq!(session.transcript().len(), 5);
    assert_eq!(session.transcript()[4].content, "£30");
}

#[tokio::test]
async fn panicking_provider_leaves_session_usable() {
    let session = Arc::new(tokio::sync::Mutex::new(AssistantSession::new()));

    let task = {
        let session = session.clone();
        tokio::spawn(async move {
            session.lock().await.submit("hello", &PanickingProvider).await;
        })
    };
    assert!(task.await.is_err());

    let mut session = session.lock().await;
    assert!(!session.is_pending());
    assert_eq!(session.transcript().len(), 3);
    assert_eq!(session.transcript()[2].content, APOLOGY_REPLY);

    let working = ScriptedProvider::replying("welcome back");
    assert!(session.submit("still there?", &working).await);
    assert_eq!(session.transcript()[4].content, "welcome back");
}

#[tokio::test]
async fn submit_draft_clears_the_draft() {
    let provider = ScriptedProvider::replying("£30");
    let mut session = AssistantSession::new();
    for c in "2kg?".chars() {
        session.insert_char(c);
    }

    assert!(session.submit_draft(&provider).await);

    assert_eq!(session.draft(), "");
    assert_eq!(session.transcript()[1].content, "2kg?");
    assert_eq!(provider.requests()[0].query, "2kg?");
}

// ============================================
// App: request on a background task
// ============================================

fn type_into(app: &mut App, text: &str) {
    for c in text.chars() {
        app.session.insert_char(c);
    }
}

#[tokio::test]
async fn app_rejects_second_submission_while_pending() {
    let gate = Arc::new(Notify::new());
    let client = LlmClient::from_provider(Arc::new(GatedProvider { gate: gate.clone() }));
    let mut app = App::with_client(client);

    type_into(&mut app, "first");
    app.submit_message();

    assert!(app.is_pending());
    assert_eq!(app.status(), ConnectionStatus::Thinking);
    assert_eq!(app.session.draft(), "");
    assert_eq!(app.session.transcript().len(), 2);

    // Typing still works, sending does not
    type_into(&mut app, "second");
    app.submit_message();
    assert_eq!(app.session.transcript().len(), 2);
    assert_eq!(app.session.draft(), "second");

    gate.notify_one();
    wait_for_reply(&mut app).await;

    assert_eq!(app.session.transcript().len(), 3);
    assert_eq!(app.session.transcript()[2].content, "released");
    assert_eq!(app.status(), ConnectionStatus::Ready);
    assert!(app.reply_rx.is_none());
}

#[tokio::test]
async fn app_applies_reply_from_background_task() {
    let provider = Arc::new(ScriptedProvider::replying("That would be £80."));
    let mut app = App::with_client(LlmClient::from_provider(provider.clone()));

    type_into(&mut app, "How much to ship 5kg from UK?");
    app.submit_message();
    wait_for_reply(&mut app).await;

    let transcript = app.session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2].content, "That would be £80.");
    assert_eq!(provider.requests().len(), 1);
}

#[tokio::test]
async fn app_recovers_when_request_task_dies() {
    let mut app = App::with_client(LlmClient::from_provider(Arc::new(PanickingProvider)));

    type_into(&mut app, "hello");
    app.submit_message();
    wait_for_reply(&mut app).await;

    assert_eq!(app.session.transcript().len(), 3);
    assert_eq!(app.session.transcript()[2].content, APOLOGY_REPLY);
    assert!(!app.is_pending());
}
