//! Carries out orchestrator effects on the tokio runtime.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::GlobalConfig;
use crate::service::Fetcher;

use super::event::{Completion, Effect, Event};
use super::scheduler::arm_timer;

/// Spawns fetch tasks and timers. Every result is delivered back to the
/// event loop through `tx`; nothing spawned here touches dashboard state.
pub struct Dispatcher {
    config: Arc<GlobalConfig>,
    fetcher: Fetcher,
    tx: UnboundedSender<Event>,
    shutdown: CancellationToken,
}

impl Dispatcher {
    pub fn new(config: Arc<GlobalConfig>, fetcher: Fetcher, tx: UnboundedSender<Event>) -> Self {
        Self {
            config,
            fetcher,
            tx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token cancelled by [`Dispatcher::shutdown`].
    pub fn token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Runs one effect. `Scroll` belongs to the front end and is ignored.
    pub fn execute(&self, effect: Effect) {
        if self.shutdown.is_cancelled() {
            return;
        }
        match effect {
            Effect::Fetch { index, seq } => self.spawn_fetch(index, seq),
            Effect::ScheduleRefresh { index, after } => {
                arm_timer(
                    self.tx.clone(),
                    after,
                    Event::RefreshDue { index },
                    self.shutdown.clone(),
                );
            }
            Effect::ScheduleSpinner { after } => {
                arm_timer(
                    self.tx.clone(),
                    after,
                    Event::SpinnerTick,
                    self.shutdown.clone(),
                );
            }
            Effect::Scroll(_) => {}
        }
    }

    pub fn execute_all(&self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            self.execute(effect);
        }
    }

    /// Cancels every pending timer and in-flight fetch. Their results are
    /// never delivered.
    pub fn shutdown(&self) {
        debug!("cancelling pending fetches and timers");
        self.shutdown.cancel();
    }

    fn spawn_fetch(&self, index: usize, seq: u64) {
        let Some(spec) = self.config.services.get(index).cloned() else {
            return;
        };
        let fetcher = self.fetcher.clone();
        let tx = self.tx.clone();
        let shutdown = self.shutdown.clone();

        trace!(index, seq, url = %spec.url, "dispatching fetch");
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                report = fetcher.run(&spec) => {
                    let _ = tx.send(Event::FetchCompleted(Completion {
                        index,
                        seq,
                        outcome: report.outcome,
                        warnings: report.warnings,
                    }));
                }
            }
        });
    }
}
