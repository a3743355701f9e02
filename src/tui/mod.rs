//! Live terminal plot of a run: irradiance and power against time in hours.
//!
//! Feature-gated behind `tui`. Launch with `--tui` on the CLI.

mod controls;
mod layout;
/// Playback state.
pub mod runtime;
mod style;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::error;

use crate::config::ScenarioConfig;
use runtime::App;

/// Launches the TUI event loop replaying the given scenario under `name`.
///
/// Sets up the terminal (raw mode, alternate screen), runs the event loop,
/// and restores the terminal on exit.
pub fn run(name: &str, scenario: ScenarioConfig) {
    if let Err(e) = enable_raw_mode() {
        error!("failed to enable raw mode: {e}");
        std::process::exit(1);
    }

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        error!("failed to enter alternate screen: {e}");
        std::process::exit(1);
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            error!("failed to create terminal: {e}");
            std::process::exit(1);
        }
    };

    let mut app = App::new(name, scenario);
    let result = event_loop(&mut terminal, &mut app);

    // Teardown: always restore terminal state
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    if let Err(e) = result {
        error!("TUI crashed: {e}");
        std::process::exit(1);
    }
}

/// Core event loop: poll input, advance playback, draw.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| layout::render(frame, app))?;

        if app.quit {
            return Ok(());
        }

        let timeout = Duration::from_millis(app.tick_interval_ms());
        let deadline = app.last_tick + timeout;
        let poll_timeout = deadline.saturating_duration_since(Instant::now());

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                controls::handle_key(app, key);
            }
        }

        if app.last_tick.elapsed() >= timeout && !app.paused && !app.is_finished() {
            app.tick();
            app.last_tick = Instant::now();
        }
    }
}
