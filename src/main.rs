//! P2P Assist - UK and USA to Ghana shipping rates and an AI helper,
//! right in the terminal.

use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use p2p_assist::app::App;
use p2p_assist::config::Config;
use p2p_assist::{input, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = logging::init(&config.logging);
    tracing::info!("p2p-assist starting");

    // Create app before taking over the terminal so config warnings get logged
    let mut app = App::new(&config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = input::run_app(&mut terminal, &mut app, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = res {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }

    tracing::info!(
        questions = app.session.questions_asked(),
        "p2p-assist exiting"
    );
    Ok(())
}
