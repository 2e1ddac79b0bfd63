//! Terminal input thread.
//!
//! Polls crossterm on a plain thread and forwards keys and resizes into the
//! dashboard event channel.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::poll::Event;

use super::input::map_key;

/// How long one poll waits before checking for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Starts the input thread. It exits when `stop` is cancelled, the channel
/// closes, or the terminal stops delivering events.
pub fn spawn_input_thread(tx: UnboundedSender<Event>, stop: CancellationToken) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.is_cancelled() {
            match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    debug!(error = %e, "terminal poll failed, stopping input thread");
                    break;
                }
            }

            let event = match event::read() {
                Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    match map_key(key) {
                        Some(key) => Event::Input(key),
                        None => continue,
                    }
                }
                Ok(CrosstermEvent::Resize(width, height)) => Event::Resize { width, height },
                Ok(_) => continue,
                Err(e) => {
                    debug!(error = %e, "terminal read failed, stopping input thread");
                    break;
                }
            };

            if tx.send(event).is_err() {
                break;
            }
        }
    })
}
