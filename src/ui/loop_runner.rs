//! Main event loop for the TUI.
//!
//! This module contains the core event loop that multiplexes terminal input,
//! Unix signals and periodic ticks.

use crate::app::App;
use anyhow::Result;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::input::handle_input;
use super::mouse::handle_mouse;
use super::pointer;
use super::render::render;

/// Result of handling a key press event.
///
/// Returned by input handlers to signal whether the application should
/// continue running or terminate gracefully.
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Runs the TUI application event loop.
///
/// Uses `tokio::select!` to multiplex:
/// - **Terminal input**: keys, mouse, focus and resize events from crossterm's
///   async event stream
/// - **Signals**: SIGTERM/SIGINT end the loop like `q`
/// - **Periodic tick**: 250ms timer for status expiry
///
/// # Panic Safety
///
/// Installs a panic hook that restores terminal state before unwinding,
/// ensuring the terminal is not left in raw mode on panic.
pub async fn run(app: &mut App) -> Result<()> {
    // Install panic hook BEFORE setting up terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        pointer::reset_shape();
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, app).await;
    finish(app, outcome, || restore_terminal(terminal))
}

/// Leave the TUI after the loop ends, whether it ended cleanly or not.
///
/// Any drag is cancelled first so the pointer shape is restored before the
/// screen is left. A loop error takes precedence over a restore error.
fn finish(
    app: &mut App,
    outcome: Result<()>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<()> {
    app.panel.cancel_resize();
    let restored = restore();
    match (outcome, restored) {
        (Err(e), Err(restore_err)) => {
            tracing::warn!(error = %restore_err, "Failed to restore terminal");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), restored) => restored,
    }
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut event_stream = crossterm::event::EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    // On non-Unix platforms these become pending futures that never complete
    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    loop {
        // Only render when state has changed
        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;

            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                return Ok(());
            }

            _ = sigint_fut => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                return Ok(());
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        if let Action::Quit = handle_event(app, event).await {
                            return Ok(());
                        }
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Terminal event stream error");
                    }
                    None => {
                        tracing::info!("Terminal event stream closed");
                        return Ok(());
                    }
                }
            }

            _ = tick_interval.tick() => {
                if app.clear_expired_status() {
                    app.needs_redraw = true;
                }
            }
        }
    }
}

/// Route one terminal event. Errors from handlers become status messages.
async fn handle_event(app: &mut App, event: Event) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            app.needs_redraw = true;
            match handle_input(app, key.code, key.modifiers).await {
                Ok(action) => return action,
                Err(e) => {
                    tracing::warn!(error = %e, "Input handler failed");
                    app.set_status(format!("Error: {:#}", e));
                }
            }
        }
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::FocusLost => {
            if app.panel.is_dragging() {
                tracing::debug!("Focus lost during resize, cancelling");
                app.panel.cancel_resize();
                app.needs_redraw = true;
            }
        }
        Event::Resize(_, _) => app.needs_redraw = true,
        _ => {}
    }
    Action::Continue
}

/// Set up the terminal for TUI rendering.
///
/// Raw mode is switched back off if the rest of the setup fails.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let terminal = enter_screen().inspect_err(|_| {
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    })?;
    Ok(terminal)
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Restore terminal to normal state.
fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::abc_catalog;
    use crate::config::Config;
    use crate::panel::test_support::RecordingPointer;
    use crate::preferences::PreferenceManager;
    use crate::storage::Database;
    use std::cell::Cell;
    use std::sync::Arc;

    async fn dragging_app() -> (App, Arc<RecordingPointer>) {
        let db = Database::open(":memory:").await.unwrap();
        let pointer = Arc::new(RecordingPointer::default());
        let mut app = App::new(
            db,
            Arc::new(abc_catalog()),
            PreferenceManager::from_config(&Config::default()),
            pointer.clone(),
        );
        app.panel.begin_resize(240);
        assert!(pointer.is_engaged());
        (app, pointer)
    }

    #[tokio::test]
    async fn test_loop_error_still_restores_terminal() {
        let (mut app, pointer) = dragging_app().await;
        let restored = Cell::new(false);

        let result = finish(&mut app, Err(anyhow::anyhow!("draw failed")), || {
            restored.set(true);
            Ok(())
        });

        assert_eq!(result.unwrap_err().to_string(), "draw failed");
        assert!(restored.get());
        assert!(!app.panel.is_dragging());
        assert!(!pointer.is_engaged());
    }

    #[tokio::test]
    async fn test_loop_error_wins_over_restore_error() {
        let (mut app, _pointer) = dragging_app().await;
        let result = finish(&mut app, Err(anyhow::anyhow!("draw failed")), || {
            Err(anyhow::anyhow!("restore failed"))
        });
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }

    #[tokio::test]
    async fn test_clean_exit_reports_restore_error() {
        let (mut app, _pointer) = dragging_app().await;
        assert!(finish(&mut app, Ok(()), || Ok(())).is_ok());
        let result = finish(&mut app, Ok(()), || Err(anyhow::anyhow!("restore failed")));
        assert_eq!(result.unwrap_err().to_string(), "restore failed");
    }
}
