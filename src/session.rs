//! Assistant session controller.
//!
//! Owns the transcript, the draft being typed and the `pending` flag that
//! allows one request in flight at a time. A submission is split in two
//! halves so the terminal event loop can run the request on a task:
//! [`AssistantSession::begin`] records the user turn and hands back the
//! request to send, [`AssistantSession::settle`] records the outcome.
//! [`AssistantSession::submit`] runs both halves around one provider call.

use tracing::{debug, info, warn};

use crate::llm::{GenerateRequest, LlmProvider, ProviderError, ProviderResult};
use crate::message::{Message, Role};
use crate::prompt;

/// First message of every session.
pub const GREETING: &str = "Hello! I'm your P2P Logistics assistant. I can help you with shipping rates from both the UK and USA to Ghana. How can I assist you today?";

/// Used when the service answers without any text.
pub const FALLBACK_REPLY: &str = "I'm sorry, I'm having trouble connecting right now. Please try again or contact us via WhatsApp.";

/// Used when the request fails for any reason.
pub const APOLOGY_REPLY: &str = "I apologize, but I've encountered an error. Please contact our support team directly for assistance.";

/// A submission that has been accepted and is waiting on the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub request: GenerateRequest,
}

/// Conversation state for one run of the assistant.
#[derive(Debug)]
pub struct AssistantSession {
    transcript: Vec<Message>,
    pending: bool,
    /// Text being composed
    draft: String,
    /// Cursor position in the draft, in chars
    cursor: usize,
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantSession {
    /// Create a session seeded with the greeting.
    pub fn new() -> Self {
        Self {
            transcript: vec![Message::assistant(GREETING.to_string())],
            pending: false,
            draft: String::new(),
            cursor: 0,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// True while a request is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Cursor position in the draft, counted in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether `submit_draft` would currently be accepted.
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.draft.trim().is_empty()
    }

    /// Accept a submission and return the request to send.
    ///
    /// Returns `None` without touching any state when `text` is blank or a
    /// request is already in flight.
    pub fn begin(&mut self, text: &str) -> Option<PendingTurn> {
        if text.trim().is_empty() {
            debug!("ignoring blank submission");
            return None;
        }
        if self.pending {
            debug!("ignoring submission while a reply is pending");
            return None;
        }

        self.transcript.push(Message::user(text.to_string()));
        self.clear_draft();
        self.pending = true;

        let request = GenerateRequest::new(text, prompt::system_instruction());
        Some(PendingTurn { request })
    }

    /// Record the outcome of the in-flight request.
    ///
    /// Appends exactly one assistant message and clears `pending`. Ignored
    /// when nothing is in flight.
    pub fn settle(&mut self, outcome: ProviderResult<Option<String>>) {
        if !self.pending {
            warn!("reply arrived with no request in flight; dropping it");
            return;
        }

        let reply = match outcome {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => {
                warn!("service returned no text; using fallback reply");
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                warn!(error = %e, "assistant turn failed");
                APOLOGY_REPLY.to_string()
            }
        };

        self.transcript.push(Message::assistant(reply));
        self.pending = false;
    }

    /// Submit `text` and wait for the reply.
    ///
    /// Returns whether the submission was accepted. Errors from the provider
    /// never escape; they become the apology message. If the returned future
    /// is dropped before the reply lands, or the provider panics, the turn is
    /// settled with the apology.
    pub async fn submit(&mut self, text: &str, provider: &dyn LlmProvider) -> bool {
        let Some(turn) = self.begin(text) else {
            return false;
        };

        info!(model = provider.model(), "sending question to {}", provider.display_name());
        let guard = SettleOnDrop { session: self };
        let outcome = provider.generate(turn.request).await;
        guard.session.settle(outcome);
        true
    }

    /// Submit the current draft. See [`AssistantSession::submit`].
    pub async fn submit_draft(&mut self, provider: &dyn LlmProvider) -> bool {
        let text = self.draft.clone();
        self.submit(&text, provider).await
    }

    /// Take the draft as a submission. See [`AssistantSession::begin`].
    pub fn begin_draft(&mut self) -> Option<PendingTurn> {
        let text = self.draft.clone();
        self.begin(&text)
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.draft.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let idx = self.byte_index(self.cursor - 1);
            self.draft.remove(idx);
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.draft.chars().count() {
            self.cursor += 1;
        }
    }

    /// Clear the draft and reset the cursor.
    pub fn clear_draft(&mut self) {
        self.draft.clear();
        self.cursor = 0;
    }

    /// Number of user turns so far.
    pub fn questions_asked(&self) -> usize {
        self.transcript.iter().filter(|m| m.role == Role::User).count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.draft
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.draft.len())
    }
}

/// Settles an accepted turn that was abandoned mid-request.
struct SettleOnDrop<'a> {
    session: &'a mut AssistantSession,
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        if self.session.pending {
            self.session.settle(Err(ProviderError::Other(
                "request abandoned before a reply arrived".to_string(),
            )));
        }
    }
}
