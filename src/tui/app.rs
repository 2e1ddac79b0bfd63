//! Main TUI application.

use std::io::{self, Stdout};
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::config::GlobalConfig;
use crate::poll::{Dispatcher, Effect, Event, Orchestrator};
use crate::service::Fetcher;

use super::event::spawn_input_thread;
use super::render::render;
use super::viewport::Viewport;

type Backend = CrosstermBackend<Stdout>;

/// Main TUI application.
pub struct App {
    config: Arc<GlobalConfig>,
    fetcher: Fetcher,
}

impl App {
    pub fn new(config: Arc<GlobalConfig>, fetcher: Fetcher) -> Self {
        Self { config, fetcher }
    }

    /// Runs the dashboard until the user quits. `tx`/`rx` is the event
    /// channel; other producers (signal handlers) may hold clones of `tx`.
    pub async fn run(
        self,
        tx: UnboundedSender<Event>,
        rx: UnboundedReceiver<Event>,
    ) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut terminal = or_undo(
            || {
                let mut stdout = io::stdout();
                execute!(stdout, EnterAlternateScreen)?;
                Terminal::new(CrosstermBackend::new(stdout))
            },
            || {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
            },
        )?;

        let result = self.event_loop(&mut terminal, tx, rx).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        self,
        terminal: &mut Terminal<Backend>,
        tx: UnboundedSender<Event>,
        mut rx: UnboundedReceiver<Event>,
    ) -> io::Result<()> {
        let mut orchestrator = Orchestrator::new(self.config.clone());
        let dispatcher = Dispatcher::new(self.config, self.fetcher, tx.clone());
        let mut viewport = Viewport::default();

        let size = terminal.size()?;
        orchestrator.process_event(Event::Resize {
            width: size.width,
            height: size.height,
        });

        let input = spawn_input_thread(tx, dispatcher.token());
        dispatcher.execute_all(orchestrator.start());

        let mut result = terminal
            .draw(|frame| {
                render(
                    frame,
                    orchestrator.state(),
                    orchestrator.config(),
                    orchestrator.layout(),
                    &mut viewport,
                )
            })
            .map(|_| ());

        while result.is_ok() {
            let Some(event) = rx.recv().await else {
                break;
            };

            let step = orchestrator.process_event(event);
            for effect in step.effects {
                match effect {
                    Effect::Scroll(scroll) => viewport.scroll(scroll),
                    other => dispatcher.execute(other),
                }
            }
            if !step.keep_running {
                info!("quit requested");
                break;
            }
            if step.changed {
                result = terminal
                    .draw(|frame| {
                        render(
                            frame,
                            orchestrator.state(),
                            orchestrator.config(),
                            orchestrator.layout(),
                            &mut viewport,
                        )
                    })
                    .map(|_| ());
            }
        }

        dispatcher.shutdown();
        let joined = tokio::task::spawn_blocking(move || input.join()).await;
        if !matches!(joined, Ok(Ok(()))) {
            debug!("input thread did not exit cleanly");
        }
        result
    }
}

/// Runs `setup`, running `undo` first when it fails.
fn or_undo<T>(setup: impl FnOnce() -> io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    setup().inspect_err(|_| undo())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_is_undone() {
        let undone = Cell::new(false);
        let result: io::Result<()> = or_undo(
            || Err(io::Error::other("no tty")),
            || undone.set(true),
        );
        assert!(result.is_err());
        assert!(undone.get());
    }

    #[test]
    fn test_successful_setup_is_kept() {
        let undone = Cell::new(false);
        let result = or_undo(|| Ok(7), || undone.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!undone.get());
    }
}
