//! diffnote: review a diff in the terminal and hand line comments back as JSON.
//!
//! Entry point for the `diffnote` binary. Wires together configuration
//! (`cli`, `config`), diff acquisition (`acquire`), the terminal lifecycle
//! (`tui`), the event bus (`event`), rendering (`ui`, `highlight`, `theme`) and
//! the review session from `diffnote-core`.
//!
//! # Startup sequence (order matters)
//!
//! 1. Parse flags and load `config.toml`; resolve effective settings.
//! 2. Install the file logger when a log file is configured.
//! 3. Acquire and parse the diff. Failures here exit before the terminal is
//!    touched, so the error message lands on a normal screen.
//! 4. `install_panic_hook()`: installed before `init_tui()` so a panic always
//!    restores the terminal.
//! 5. `register_sigterm()`: returns an `Arc<AtomicBool>` polled in the loop.
//! 6. `init_tui()`, then create the event channel and `spawn_event_task()`.
//!
//! # Exit path
//!
//! The loop exits only via `break`: on quit, SIGTERM, a draw error or channel
//! close. `restore_tui()` runs once after the loop, then the feedback is
//! exported. SIGTERM ends the session the same way `q` does.

mod acquire;
mod app;
mod cli;
mod config;
mod event;
mod exit_codes;
mod highlight;
mod logging;
mod theme;
mod tui;
mod ui;

use std::io::Write;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use chrono::Utc;
use clap::Parser;
use tracing::{error, info, warn};

use diffnote_core::diff::{parse_diff, MalformedPolicy};
use diffnote_core::export::{write_feedback, Feedback};
use diffnote_core::session::{Input, ReviewSession};

use crate::app::{AppState, FlashLevel};
use crate::config::Settings;
use crate::event::AppEvent;
use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};

/// How often the loop checks the SIGTERM flag when no events arrive.
const HEARTBEAT: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Step 1: flags, then config. A bad config file is reported, not fatal.
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { exit_codes::USAGE_ERROR } else { exit_codes::SUCCESS };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };
    let config_path = config::config_path();
    let (config, config_error) = match config::load_config(&config_path) {
        Ok(config) => (config, None),
        Err(e) => {
            eprintln!("diffnote: {e}; using defaults");
            (config::Config::default(), Some(e))
        }
    };
    let settings = Settings::resolve(cli, config);

    // Step 2: logging goes to a file only; the terminal belongs to the TUI.
    if let Some(path) = &settings.log_file {
        if let Err(e) = logging::init_logging(path) {
            eprintln!("diffnote: cannot open log file {}: {e:#}", path.display());
            return ExitCode::from(exit_codes::USAGE_ERROR);
        }
    }
    if let Some(e) = config_error {
        warn!(error = %e, "ignoring unreadable config");
    }
    info!(?settings, "starting");

    // Step 3: the whole diff is read and parsed before the UI starts.
    let text = match acquire::acquire(&settings.source) {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, "diff acquisition failed");
            eprintln!("diffnote: {e}");
            return ExitCode::from(exit_codes::ACQUISITION_FAILURE);
        }
    };
    let policy = if settings.strict { MalformedPolicy::Abort } else { MalformedPolicy::Skip };
    let parsed = match parse_diff(&text, policy) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!(error = %e, "diff rejected");
            eprintln!("diffnote: {e}");
            return ExitCode::from(exit_codes::MALFORMED_DIFF);
        }
    };
    for hunk in &parsed.skipped {
        warn!(%hunk, "skipped malformed hunk");
    }

    let theme = theme::Theme::from_name(&settings.theme);
    let rows = highlight::highlight_model(&parsed.model, &theme);
    let mut state = AppState::new(ReviewSession::new(parsed.model), rows, settings.page_size);
    if !parsed.skipped.is_empty() {
        let text = format!("Skipped {} malformed hunk(s)", parsed.skipped.len());
        state.set_flash(text, FlashLevel::Warn, Instant::now());
    }

    // Step 4: panic hook before the terminal enters raw mode.
    tui::install_panic_hook();

    // Step 5: SIGTERM flag, polled in the heartbeat arm below.
    let term_flag = match tui::register_sigterm() {
        Ok(flag) => flag,
        Err(e) => {
            eprintln!("diffnote: cannot register SIGTERM handler: {e}");
            return ExitCode::from(exit_codes::USAGE_ERROR);
        }
    };

    // Step 6: alternate screen, raw mode, event task.
    let mut terminal = match tui::init_tui() {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = tui::restore_tui();
            eprintln!("diffnote: cannot initialise terminal: {e}");
            return ExitCode::from(exit_codes::USAGE_ERROR);
        }
    };
    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    // Event loop: exits only via `break`, so `restore_tui()` is always reached.
    'event_loop: loop {
        tokio::select! {
            _ = tokio::time::sleep(HEARTBEAT) => {}
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            error!(error = %e, "draw failed");
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Key(key)) => {
                        if handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Mouse(mouse)) => {
                        handle_mouse(mouse, &mut state);
                    }
                    Some(AppEvent::Tick) => state.tick(Instant::now()),
                    // ratatui picks up the new size from frame.area() on the next Render.
                    Some(AppEvent::Resize(_, _)) => {}
                    None => break 'event_loop,
                }
            }
        }
        if term_flag.load(Ordering::Relaxed) {
            info!("SIGTERM received, finishing session");
            break 'event_loop;
        }
    }

    if let Err(e) = tui::restore_tui() {
        warn!(error = %e, "terminal restore failed");
    }

    // Whatever ended the loop, the session ends as if Quit had been pressed.
    let mut session = state.session;
    session.handle(Input::Quit);
    let feedback = session.finish(&settings.diff_command, Utc::now());
    export(&settings, &feedback)
}

/// Writes the feedback to its destination.
///
/// If the file cannot be written the error goes to stderr and the JSON to
/// stdout, so the comments are never lost.
fn export(settings: &Settings, feedback: &Feedback) -> ExitCode {
    let result = if settings.output_is_stdout() {
        print_json(feedback)
    } else {
        write_feedback(&settings.output, feedback).map_err(anyhow::Error::from)
    };
    match result {
        Ok(()) => {
            info!(comments = feedback.comments.len(), "session exported");
            ExitCode::from(exit_codes::SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "export failed");
            eprintln!("diffnote: {e:#}");
            if let Err(e) = print_json(feedback) {
                eprintln!("diffnote: {e:#}");
            }
            ExitCode::from(exit_codes::EXPORT_FAILURE)
        }
    }
}

fn print_json(feedback: &Feedback) -> anyhow::Result<()> {
    let json = feedback.to_json()?;
    let mut out = std::io::stdout().lock();
    out.write_all(json.as_bytes())?;
    out.flush()?;
    Ok(())
}
