use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};

use crate::app::{App, View};
use crate::config::Config;
use crate::tariffs::Region;
use crate::ui;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running the app
    Continue,
    /// Exit the app
    Exit,
}

/// Cursor blink interval in milliseconds.
const CURSOR_BLINK_MS: u64 = 530;

/// Typing indicator frame interval in milliseconds.
const TYPING_TICK_MS: u64 = 400;

/// Run the main application loop.
///
/// Must run inside a tokio runtime: submissions spawn their request task.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &Config,
) -> io::Result<()> {
    let behavior = &config.behavior;
    let mut last_cursor_toggle = Instant::now();
    let mut last_typing_tick = Instant::now();

    loop {
        // Apply a reply if one has landed
        app.process_reply();

        if app.is_pending() && last_typing_tick.elapsed() >= Duration::from_millis(TYPING_TICK_MS)
        {
            app.animation.tick();
            last_typing_tick = Instant::now();
        }

        terminal.draw(|f| ui::ui(f, app, config))?;

        // Toggle cursor blink
        if last_cursor_toggle.elapsed() >= Duration::from_millis(CURSOR_BLINK_MS) {
            app.toggle_cursor();
            last_cursor_toggle = Instant::now();
        }

        // Poll faster while waiting on a reply so it shows up promptly
        let timeout = if app.is_pending() {
            Duration::from_millis(behavior.busy_poll_ms)
        } else {
            Duration::from_millis(behavior.idle_poll_ms)
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // Reset cursor to visible on any keypress
                    app.animation.cursor_visible = true;
                    last_cursor_toggle = Instant::now();

                    if handle_key_event(app, key.code, key.modifiers, config) == HandleResult::Exit
                    {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Handle a key event and return whether to continue or exit.
pub fn handle_key_event(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    config: &Config,
) -> HandleResult {
    // Global shortcuts (work in all views)
    match code {
        KeyCode::Char('c') | KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
            return HandleResult::Exit;
        }
        KeyCode::Esc => return HandleResult::Exit,
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_view();
            return HandleResult::Continue;
        }
        _ => {}
    }

    match app.view {
        View::Chat => handle_chat_keys(app, code, config.behavior.scroll_page_size),
        View::Tariffs => handle_tariff_keys(app, code),
    }
    HandleResult::Continue
}

/// Handle key events in the chat view.
fn handle_chat_keys(app: &mut App, code: KeyCode, page_size: usize) {
    match code {
        KeyCode::Enter => app.submit_message(),
        KeyCode::Char(c) => app.session.insert_char(c),
        KeyCode::Backspace => app.session.backspace(),
        KeyCode::Left => app.session.move_cursor_left(),
        KeyCode::Right => app.session.move_cursor_right(),
        KeyCode::Up => app.scroll.scroll_up(),
        KeyCode::Down => app.scroll.scroll_down(),
        KeyCode::PageUp => app.scroll.scroll_page_up(page_size),
        KeyCode::PageDown => app.scroll.scroll_page_down(page_size),
        KeyCode::Home => app.scroll.scroll_to_top(),
        KeyCode::End => app.scroll.scroll_to_bottom(),
        _ => {}
    }
}

/// Handle key events in the tariff view.
fn handle_tariff_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left | KeyCode::Right => app.toggle_region(),
        KeyCode::Char('u') | KeyCode::Char('U') => app.set_region(Region::Uk),
        KeyCode::Char('s') | KeyCode::Char('S') => app.set_region(Region::Usa),
        _ => {}
    }
}
