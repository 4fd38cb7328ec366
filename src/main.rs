use anyhow::{Context, Result};
use clap::Parser;
use country_map::app::App;
use country_map::config::{save_settings, Cli, Config};
use country_map::data::load_dataset;
use country_map::logging::init_logging;
use country_map::ui;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::{error, info};

fn main() -> Result<()> {
    let config = Config::resolve(Cli::parse()).context("failed to read configuration")?;
    let _log_guard = init_logging(&config.log_config()).context("failed to set up logging")?;

    if config.save {
        if let Some(path) = &config.settings_path {
            save_settings(&config.settings, path)?;
        }
    }

    let dataset = load_dataset(&config.dataset_source());
    info!(regions = dataset.len(), origin = dataset.origin(), "dataset loaded");

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal, App::new(&config, dataset));

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    if let Err(e) = &result {
        error!(error = %e, "exited with error");
    }
    result
}

fn run(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|frame| ui::render(frame, &app))?;
            dirty = false;
        }

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key.code),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
            dirty = true;
        }

        // Apply finished background lookups
        dirty |= app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
