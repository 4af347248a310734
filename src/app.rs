use ratatui::widgets::ScrollbarState;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::config::Config;
use crate::llm::{LlmClient, LlmConfig, ProviderError, ProviderResult};
use crate::session::AssistantSession;
use crate::tariffs::Region;

/// Connection status shown in the chat border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Not configured (no API key)
    NotConfigured,
    /// Ready to send messages
    Ready,
    /// Waiting on a reply
    Thinking,
}

impl ConnectionStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::NotConfigured => "● No API Key",
            ConnectionStatus::Ready => "● Ready",
            ConnectionStatus::Thinking => "● Thinking...",
        }
    }
}

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Chat,
    Tariffs,
}

impl View {
    pub const fn all() -> &'static [View] {
        &[View::Chat, View::Tariffs]
    }

    pub const fn title(&self) -> &'static str {
        match self {
            View::Chat => "Assistant",
            View::Tariffs => "Tariffs",
        }
    }

    pub const fn next(&self) -> View {
        match self {
            View::Chat => View::Tariffs,
            View::Tariffs => View::Chat,
        }
    }
}

/// Scroll state for the transcript, counted in rendered lines.
#[derive(Debug)]
pub struct ScrollState {
    /// First visible line
    pub offset: usize,
    /// Stick to the newest line as content grows
    pub follow: bool,
    /// Scrollbar state for ratatui
    pub scrollbar: ScrollbarState,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            follow: true,
            scrollbar: ScrollbarState::default(),
        }
    }
}

impl ScrollState {
    /// Scroll up one line.
    pub fn scroll_up(&mut self) {
        self.follow = false;
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scroll down one line.
    pub fn scroll_down(&mut self) {
        self.offset = self.offset.saturating_add(1);
    }

    /// Scroll up by page size.
    pub fn scroll_page_up(&mut self, page_size: usize) {
        self.follow = false;
        self.offset = self.offset.saturating_sub(page_size);
    }

    /// Scroll down by page size.
    pub fn scroll_page_down(&mut self, page_size: usize) {
        self.offset = self.offset.saturating_add(page_size);
    }

    /// Scroll to top.
    pub fn scroll_to_top(&mut self) {
        self.follow = false;
        self.offset = 0;
    }

    /// Scroll to bottom and keep following new lines.
    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
    }

    /// Clamp the offset to the content and update the scrollbar.
    ///
    /// Reaching the last page turns following back on.
    pub fn update(&mut self, total_lines: usize, viewport: usize) {
        let max_offset = total_lines.saturating_sub(viewport);
        if self.follow || self.offset >= max_offset {
            self.offset = max_offset;
            self.follow = true;
        }
        self.scrollbar = self.scrollbar.content_length(max_offset + 1);
        self.scrollbar = self.scrollbar.position(self.offset);
    }
}

/// Animation-related state for UI effects.
#[derive(Debug)]
pub struct AnimationState {
    /// Cursor blink visibility state
    pub cursor_visible: bool,
    /// Frame counter for the typing indicator
    pub typing_frame: usize,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            cursor_visible: true,
            typing_frame: 0,
        }
    }
}

impl AnimationState {
    /// Toggle cursor visibility for blinking effect.
    pub fn toggle_cursor(&mut self) {
        self.cursor_visible = !self.cursor_visible;
    }

    /// Advance the typing indicator.
    pub fn tick(&mut self) {
        self.typing_frame = self.typing_frame.wrapping_add(1);
    }

    /// Dots shown while waiting on a reply: ".", "..", "...".
    pub fn typing_dots(&self) -> &'static str {
        match self.typing_frame % 3 {
            0 => ".",
            1 => "..",
            _ => "...",
        }
    }
}

/// Application state for the assistant TUI.
pub struct App {
    /// Conversation: transcript, draft, pending flag
    pub session: AssistantSession,
    /// Generation service client
    pub client: LlmClient,
    /// Current screen
    pub view: View,
    /// Region selected in the tariff view
    pub region: Region,
    /// Transcript scroll position
    pub scroll: ScrollState,
    /// Cursor blink and typing indicator
    pub animation: AnimationState,
    /// Receiver for the in-flight request's outcome
    pub reply_rx: Option<oneshot::Receiver<ProviderResult<Option<String>>>>,
}

impl App {
    /// Create a new App from config, reading credentials from the environment.
    pub fn new(config: &Config) -> Self {
        let llm_config = LlmConfig::from_env_and_config(Some(&config.llm));
        if !llm_config.is_configured() {
            warn!(
                provider = llm_config.provider.display_name(),
                "no API key configured; replies will fail until one is set"
            );
        }
        info!(
            provider = llm_config.provider.display_name(),
            model = %llm_config.model,
            "assistant client initialized"
        );
        Self::with_client(LlmClient::new(llm_config))
    }

    /// Create a new App around an existing client.
    pub fn with_client(client: LlmClient) -> Self {
        Self {
            session: AssistantSession::new(),
            client,
            view: View::default(),
            region: Region::default(),
            scroll: ScrollState::default(),
            animation: AnimationState::default(),
            reply_rx: None,
        }
    }

    /// Current status for the chat border.
    pub fn status(&self) -> ConnectionStatus {
        if self.session.is_pending() {
            ConnectionStatus::Thinking
        } else if !self.client.is_configured() {
            ConnectionStatus::NotConfigured
        } else {
            ConnectionStatus::Ready
        }
    }

    /// Submit the draft and start the request on a background task.
    ///
    /// Must be called from within a tokio runtime. Does nothing when the
    /// session rejects the submission.
    pub fn submit_message(&mut self) {
        let Some(turn) = self.session.begin_draft() else {
            return;
        };

        let client = self.client.clone();
        let (tx, rx) = oneshot::channel();
        info!(model = client.model(), "sending question to {}", client.display_name());

        tokio::spawn(async move {
            let outcome = client.provider().generate(turn.request).await;
            // Receiver is gone only when the app is shutting down.
            let _ = tx.send(outcome);
        });

        self.reply_rx = Some(rx);
        self.scroll.scroll_to_bottom();
    }

    /// Apply the reply if it has arrived. Call this in the event loop.
    pub fn process_reply(&mut self) {
        let Some(rx) = &mut self.reply_rx else {
            return;
        };

        match rx.try_recv() {
            Ok(outcome) => {
                self.session.settle(outcome);
                self.reply_rx = None;
                self.scroll.scroll_to_bottom();
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                // Task died without sending; still owe the user a reply.
                self.session.settle(Err(ProviderError::Other(
                    "request task ended without a reply".to_string(),
                )));
                self.reply_rx = None;
                self.scroll.scroll_to_bottom();
            }
        }
    }

    /// Check if a reply is pending.
    pub fn is_pending(&self) -> bool {
        self.session.is_pending()
    }

    /// Switch to the next view.
    pub fn toggle_view(&mut self) {
        self.view = self.view.next();
    }

    /// Select a region in the tariff view.
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    /// Flip between the UK and USA tables.
    pub fn toggle_region(&mut self) {
        self.region = self.region.toggled();
    }

    /// Toggle cursor visibility for blinking effect.
    pub fn toggle_cursor(&mut self) {
        self.animation.toggle_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::with_client(LlmClient::new(LlmConfig::default()))
    }

    #[test]
    fn test_status_without_key() {
        let app = app();
        assert_eq!(app.status(), ConnectionStatus::NotConfigured);
        assert_eq!(app.status().label(), "● No API Key");
    }

    #[test]
    fn test_view_and_region_toggles() {
        let mut app = app();
        assert_eq!(app.view, View::Chat);
        app.toggle_view();
        assert_eq!(app.view, View::Tariffs);
        app.toggle_view();
        assert_eq!(app.view, View::Chat);

        assert_eq!(app.region, Region::Uk);
        app.toggle_region();
        assert_eq!(app.region, Region::Usa);
        app.set_region(Region::Uk);
        assert_eq!(app.region, Region::Uk);
    }

    #[test]
    fn test_scroll_follows_until_user_scrolls_up() {
        let mut scroll = ScrollState::default();
        scroll.update(30, 10);
        assert_eq!(scroll.offset, 20);

        scroll.scroll_up();
        scroll.update(40, 10);
        assert_eq!(scroll.offset, 19);
        assert!(!scroll.follow);

        scroll.scroll_page_down(100);
        scroll.update(40, 10);
        assert_eq!(scroll.offset, 30);
        assert!(scroll.follow);
    }

    #[test]
    fn test_blank_submit_spawns_nothing() {
        let mut app = app();
        // No runtime needed: a blank draft never reaches tokio::spawn.
        app.submit_message();
        assert!(app.reply_rx.is_none());
        assert_eq!(app.session.transcript().len(), 1);
    }

    #[test]
    fn test_typing_dots_cycle() {
        let mut animation = AnimationState::default();
        assert_eq!(animation.typing_dots(), ".");
        animation.tick();
        assert_eq!(animation.typing_dots(), "..");
        animation.tick();
        assert_eq!(animation.typing_dots(), "...");
        animation.tick();
        assert_eq!(animation.typing_dots(), ".");
    }
}
