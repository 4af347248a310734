//! Rendering tests for the terminal views.
//!
//! Uses ratatui's TestBackend to render into a virtual terminal buffer and
//! checks the text that ends up on screen.

use p2p_assist::app::{App, View};
use p2p_assist::config::Config;
use p2p_assist::llm::{LlmClient, LlmConfig};
use p2p_assist::tariffs::Region;
use p2p_assist::ui;
use ratatui::{backend::TestBackend, Terminal};

const TERMINAL_WIDTH: u16 = 120;
const TERMINAL_HEIGHT: u16 = 32;

/// Helper to convert a ratatui Buffer to a plain text string (no ANSI codes).
fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut output = String::new();
    for y in 0..buffer.area().height {
        for x in 0..buffer.area().width {
            output.push_str(buffer.get(x, y).symbol());
        }
        output.push('\n');
    }
    output
}

fn render(app: &mut App) -> String {
    let config = Config::default();
    let backend = TestBackend::new(TERMINAL_WIDTH, TERMINAL_HEIGHT);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::ui(f, app, &config)).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn app() -> App {
    App::with_client(LlmClient::new(LlmConfig::default()))
}

#[test]
fn chat_view_shows_greeting_and_status() {
    let mut app = app();
    let screen = render(&mut app);

    assert!(screen.contains("Global Shipping AI"));
    assert!(screen.contains("P2P: Hello! I'm your P2P Logistics assistant."));
    assert!(screen.contains("No API Key"));
    assert!(screen.contains("UK or USA shipping help..."));
}

#[test]
fn chat_view_shows_typing_indicator_while_pending() {
    let mut app = app();
    app.session.begin("How much for 5kg?").unwrap();

    let screen = render(&mut app);

    assert!(screen.contains("You: How much for 5kg?"));
    assert!(screen.contains("Thinking..."));
}

#[test]
fn tariff_view_uk_table() {
    let mut app = app();
    app.view = View::Tariffs;

    let screen = render(&mut app);

    assert!(screen.contains("UK to Ghana"));
    assert!(screen.contains("Weight (KG)"));
    assert!(screen.contains("Tariff (GBP £)"));
    assert!(screen.contains("4.1 - 6kg"));
    assert!(screen.contains("£80"));
    assert!(screen.contains("£250"));
    assert!(!screen.contains("$45"));
}

#[test]
fn tariff_view_region_toggle_switches_table() {
    let mut app = app();
    app.view = View::Tariffs;
    app.toggle_region();
    assert_eq!(app.region, Region::Usa);

    let screen = render(&mut app);

    assert!(screen.contains("Weight (LBS)"));
    assert!(screen.contains("Tariff (USD $)"));
    assert!(screen.contains("40.1 - 50 lbs"));
    assert!(screen.contains("$340"));
    assert!(!screen.contains("£80"));
}

#[test]
fn tariff_view_lists_contact_details() {
    let mut app = app();
    app.view = View::Tariffs;

    let screen = render(&mut app);

    assert!(screen.contains("+233 50 389 0000"));
    assert!(screen.contains("@p2plogisticsgh"));
}

#[test]
fn tariff_view_shows_how_it_works() {
    let mut app = app();
    app.view = View::Tariffs;

    let screen = render(&mut app);

    assert!(screen.contains("How it Works"));
    assert!(screen.contains("1. Pick a Drop Date"));
    assert!(screen.contains("2. Get Your Address"));
    assert!(screen.contains("3. Process & Re-pack"));
    assert!(screen.contains("4. Final Delivery"));
    // Table and contacts still fit above the steps
    assert!(screen.contains("£250"));
    assert!(screen.contains("@p2plogisticsgh"));
}
