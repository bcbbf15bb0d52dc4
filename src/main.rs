mod app;
mod cli;
mod config;
mod events;
mod logging;
mod speech;
mod state;
mod ui;
mod verses;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use app::App;
use cli::Cli;
use config::AppConfig;
use events::Action;
use logging::{init_logging, LogConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli(&cli);

    init_logging(&LogConfig::in_dir(&config::data_dir()?, &config.log_level))?;
    info!(version = env!("CARGO_PKG_VERSION"), source = %config.source, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app; the collection loads in the background
    let result = match App::new(config) {
        Ok(mut app) => run_app(&mut terminal, &mut app).await,
        Err(e) => Err(e),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!(error = %e, "exited with error");
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            ui::render(app, frame.area(), frame.buffer_mut());
        })?;

        // Collection load finished or failed
        app.process_load_events();

        // Speech finished or failed
        app.process_speech_events();

        // Handle input with timeout
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    let action = Action::from_key_event(key);
                    app.handle_action(action)?;
                }
            }
        }
    }

    info!("shutting down");
    Ok(())
}
