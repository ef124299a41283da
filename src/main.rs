//! project-board: track active and finished projects in the terminal
//!
//! Add projects through a validated form and drag them between the
//! active and finished panels with the keyboard.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::panic;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use project_board::{App, BoardConfig};

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Initialize logging with RUST_LOG environment variable support
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Restore the terminal before the default hook prints the panic
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    install_panic_hook();

    let working_dir = std::env::current_dir().ok();
    let config = BoardConfig::load(working_dir.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Falling back to default configuration: {}", e);
        BoardConfig::default()
    });

    tracing::info!("Starting project-board in {:?}", working_dir);

    let mut terminal = setup_terminal()?;

    let result = match App::new(config) {
        Ok(mut app) => {
            tokio::select! {
                res = app.run(&mut terminal) => res,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received Ctrl+C, shutting down gracefully");
                    Ok(())
                }
            }
        }
        Err(e) => Err(e),
    };

    // Restore terminal (always, even on error)
    restore_terminal(&mut terminal)?;

    result?;

    Ok(())
}
