//! shopchat-tui: Terminal UI for the shop assistant chat widget
//!
//! This crate draws the engine's view tree with ratatui and drives the
//! widget from terminal events:
//! - Chat screen with message bubbles, draft input and send control
//! - Background event polling
//! - Non-blocking chat service calls, one task per submission

mod app;
mod event;
mod text;
#[cfg(test)]
pub mod test_utils;
mod ui;

pub use app::App;
pub use event::{key_to_action, Action, Event, EventHandler};
pub use shopchat_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    Terminal,
};
use shopchat_engine::{ChatService, Config, ServiceError, Submission, Ticket};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Event poll interval.
const TICK_RATE_MS: u64 = 100;

/// A chat service call running in the background.
struct PendingChat {
    ticket: Ticket,
    handle: JoinHandle<Result<String, ServiceError>>,
}

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(
    config: &Config,
    service: Arc<dyn ChatService>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let mut events = EventHandler::new(TICK_RATE_MS);
    info!(base_url = %config.base_url, "chat session started");

    let result = run_loop(&mut terminal, &mut app, &mut events, &service).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;
    info!(messages = app.widget.log().len(), "chat session ended");

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    service: &Arc<dyn ChatService>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut pending: Vec<PendingChat> = Vec::new();

    loop {
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        app.clamp_scroll(ui::chat::max_scroll(&app.view(), area));

        terminal.draw(|frame| {
            frame.render_widget(ui::ChatScreen::new(app), frame.area());
        })?;

        if let Some(event) = events.next().await {
            let submission = match event {
                Event::Key(key) => app.handle_action(key_to_action(key)),
                Event::Mouse(mouse) => app.handle_mouse(mouse, area),
                Event::Tick => {
                    app.tick();
                    None
                }
                // Terminal will handle resize automatically
                Event::Resize(_, _) => None,
            };

            if let Some(submission) = submission {
                pending.push(dispatch(submission, service));
            }
        }

        collect_finished(&mut pending, app).await;

        if app.should_quit {
            for chat in pending {
                chat.handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Start the chat service call for a submission without waiting for it.
fn dispatch(submission: Submission, service: &Arc<dyn ChatService>) -> PendingChat {
    debug!(ticket = %submission.ticket, "dispatching chat request");
    let service = Arc::clone(service);
    let Submission { ticket, text } = submission;
    let handle = tokio::spawn(async move { service.send(&text).await });
    PendingChat { ticket, handle }
}

/// Apply the outcome of every finished call. Unfinished calls stay pending.
async fn collect_finished(pending: &mut Vec<PendingChat>, app: &mut App) {
    let mut i = 0;
    while i < pending.len() {
        if pending[i].handle.is_finished() {
            let chat = pending.swap_remove(i);
            let outcome = match chat.handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(ServiceError::Other(format!("chat task failed: {e}"))),
            };
            app.complete(chat.ticket, outcome);
        } else {
            i += 1;
        }
    }
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shopchat_engine::{Message, WidgetState, FALLBACK_REPLY};
    use std::time::Duration;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }

    /// Echoes the message back after a delay proportional to its length.
    struct SlowEcho;

    /// Never answers "hang"; echoes anything else at once.
    struct Unresponsive;

    #[async_trait]
    impl ChatService for Unresponsive {
        async fn send(&self, message: &str) -> Result<String, ServiceError> {
            if message == "hang" {
                std::future::pending::<()>().await;
            }
            Ok(format!("echo: {message}"))
        }
    }

    #[async_trait]
    impl ChatService for SlowEcho {
        async fn send(&self, message: &str) -> Result<String, ServiceError> {
            let delay = u64::try_from(message.len()).unwrap_or(0) * 20;
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if message.contains("fail") {
                Err(ServiceError::Other("scripted failure".into()))
            } else {
                Ok(format!("echo: {message}"))
            }
        }
    }

    async fn drain(pending: &mut Vec<PendingChat>, app: &mut App) {
        while !pending.is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
            collect_finished(pending, app).await;
        }
    }

    fn submit_text(app: &mut App, text: &str) -> Submission {
        for ch in text.chars() {
            app.handle_action(Action::Insert(ch));
        }
        app.handle_action(Action::Submit).expect("draft submits")
    }

    #[tokio::test]
    async fn test_dispatch_and_collect_reply() {
        let service: Arc<dyn ChatService> = Arc::new(SlowEcho);
        let mut app = App::new_for_test();

        let mut pending = vec![dispatch(submit_text(&mut app, "hi"), &service)];
        assert_eq!(
            app.widget.state(),
            WidgetState::AwaitingResponse { in_flight: 1 }
        );

        drain(&mut pending, &mut app).await;
        assert_eq!(app.widget.log().last(), Some(&Message::bot("echo: hi")));
        assert_eq!(app.widget.state(), WidgetState::Idle);
    }

    #[tokio::test]
    async fn test_overlapping_requests_apply_as_they_resolve() {
        let service: Arc<dyn ChatService> = Arc::new(SlowEcho);
        let mut app = App::new_for_test();

        // The first request is slower than the second.
        let mut pending = vec![dispatch(
            submit_text(&mut app, "a much longer first question"),
            &service,
        )];
        pending.push(dispatch(submit_text(&mut app, "short"), &service));

        drain(&mut pending, &mut app).await;

        let texts: Vec<&str> = app.widget.log().iter().map(Message::text).collect();
        assert_eq!(
            &texts[1..],
            &[
                "a much longer first question",
                "short",
                "echo: short",
                "echo: a much longer first question",
            ]
        );
        assert_eq!(app.widget.state(), WidgetState::Idle);
    }

    #[tokio::test]
    async fn test_hung_request_does_not_hide_later_replies() {
        let service: Arc<dyn ChatService> = Arc::new(Unresponsive);
        let mut app = App::new_for_test();

        let mut pending = vec![dispatch(submit_text(&mut app, "hang"), &service)];
        pending.push(dispatch(submit_text(&mut app, "ok"), &service));

        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            collect_finished(&mut pending, &mut app).await;
            if pending.len() == 1 {
                break;
            }
        }

        assert_eq!(pending.len(), 1);
        assert_eq!(app.widget.log().last(), Some(&Message::bot("echo: ok")));
        assert_eq!(
            app.widget.state(),
            WidgetState::AwaitingResponse { in_flight: 1 }
        );

        for chat in pending {
            chat.handle.abort();
        }
    }

    #[tokio::test]
    async fn test_failed_request_shows_fallback() {
        let service: Arc<dyn ChatService> = Arc::new(SlowEcho);
        let mut app = App::new_for_test();

        let mut pending = vec![dispatch(submit_text(&mut app, "fail"), &service)];
        drain(&mut pending, &mut app).await;

        assert_eq!(app.widget.log().last(), Some(&Message::bot(FALLBACK_REPLY)));
    }

    #[test]
    fn test_draw_through_terminal_backend() {
        let app = App::new_for_test();
        let mut terminal = test_utils::create_test_terminal_sized(60, 20);
        terminal
            .draw(|frame| frame.render_widget(ui::ChatScreen::new(&app), frame.area()))
            .unwrap();

        let screen = test_utils::buffer_to_string(terminal.backend().buffer());
        assert!(screen.contains("Shop Assistant"));
    }
}
