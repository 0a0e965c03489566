//! luckywheel - Spin a wheel in the terminal to pick one of your options.
//!
//! # Features
//!
//! - Two to ten editable options, each with its own accent color
//! - Eased five second spin that always lands on a uniformly chosen option
//! - Synthesized tick and fanfare sounds, no audio files needed
//! - Export of the sound effects to WAV
//!
//! # Usage
//!
//! ```bash
//! cargo run                              # Spin the default options
//! cargo run -- --options lunch.json      # Spin your own options
//! cargo run -- --export-sounds sounds/   # Write tick.wav and win.wav
//! ```
//!
//! Press `?` for help with keyboard shortcuts.

use luckywheel::{
    export_sound_effects, load_options, ui, App, AudioEngine, CliOptions, OptionList,
    WheelSession,
};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Duration;

/// How long to wait for input before drawing the next frame.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Main entry point.
fn main() -> Result<()> {
    // Parse CLI options first (before any terminal setup)
    let cli = match CliOptions::parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    if cli.help {
        let program = std::env::args()
            .next()
            .unwrap_or_else(|| "luckywheel".to_string());
        eprint!("{}", CliOptions::usage(&program));
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Some(dir) = &cli.export_sounds {
        let written = export_sound_effects(dir)
            .with_context(|| format!("Failed to export sounds to {}", dir.display()))?;
        for path in written {
            eprintln!("Wrote {}", path.display());
        }
        return Ok(());
    }

    let options = match &cli.options_file {
        Some(path) => load_options(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => OptionList::with_defaults(),
    };

    let audio = Rc::new(AudioEngine::new());
    audio.set_muted(cli.muted);
    let mut app = App::new(WheelSession::new(options, audio));

    let mut terminal = setup_terminal().context("Failed to setup terminal")?;

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    restore_terminal(&mut terminal).context("Failed to restore terminal")?;

    // Handle any errors from the main loop
    result
}

/// Sets up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Runs the main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Advance the spin and expire old status messages
        app.update();

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(FRAME_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Routes a key press to the app.
///
/// The add-option input and the help overlay capture keys while open.
fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.input.is_some() {
        match key.code {
            KeyCode::Enter => app.confirm_add(),
            KeyCode::Esc => app.cancel_add(),
            KeyCode::Backspace => app.input_backspace(),
            KeyCode::Char(c) => app.input_char(c),
            _ => {}
        }
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    if app.session.result().is_some() {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => app.close_result(),
            KeyCode::Char('q') => app.quit(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char(' ') | KeyCode::Enter => app.spin(),
        KeyCode::Char('m') => app.toggle_mute(),
        KeyCode::Char('a') => app.start_add(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Up | KeyCode::Char('k') => app.select_up(),
        KeyCode::Down | KeyCode::Char('j') => app.select_down(),
        _ => {}
    }
}
