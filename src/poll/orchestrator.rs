//! The poll orchestrator.
//!
//! Single owner of [`DashboardState`]. Events are processed one at a time;
//! each call returns the effects (fetches, timers, scrolling) the caller
//! must carry out. Nothing here blocks or does I/O, so the orchestrator can
//! be driven synchronously in tests.

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info, warn};

use crate::config::GlobalConfig;

use super::event::{Completion, Effect, Event, Key};
use super::scheduler::{SPINNER_INTERVAL, resolve_interval};
use super::state::{DashboardState, Layout};

/// What processing one event produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Step {
    /// `false` once the user asked to quit.
    pub keep_running: bool,
    /// Whether anything visible changed.
    pub changed: bool,
    pub effects: Vec<Effect>,
}

impl Step {
    fn unchanged() -> Self {
        Self {
            keep_running: true,
            changed: false,
            effects: Vec::new(),
        }
    }

    fn changed(effects: Vec<Effect>) -> Self {
        Self {
            keep_running: true,
            changed: true,
            effects,
        }
    }
}

/// Event loop core.
pub struct Orchestrator {
    config: Arc<GlobalConfig>,
    state: DashboardState,
    layout: Option<Layout>,
    /// Sequence number of the newest completion applied per service.
    latest_applied: Vec<u64>,
    next_seq: u64,
}

impl Orchestrator {
    pub fn new(config: Arc<GlobalConfig>) -> Self {
        let count = config.services.len();
        Self {
            config,
            state: DashboardState::new(count),
            layout: None,
            latest_applied: vec![0; count],
            next_seq: 0,
        }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// `None` until the first resize event.
    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    /// Effects that bring the dashboard up: the spinner, plus an immediate
    /// fetch and a first refresh timer for every service.
    pub fn start(&mut self) -> Vec<Effect> {
        info!(services = self.config.services.len(), "starting poll loop");

        let mut effects = vec![Effect::ScheduleSpinner {
            after: SPINNER_INTERVAL,
        }];
        for index in 0..self.config.services.len() {
            effects.push(self.dispatch(index));
            effects.push(self.schedule_refresh(index));
        }
        effects
    }

    /// Applies one event to the state.
    pub fn process_event(&mut self, event: Event) -> Step {
        match event {
            Event::Resize { width, height } => {
                self.layout = Some(Layout { width, height });
                Step::changed(Vec::new())
            }
            Event::Input(key) => self.on_key(key),
            Event::FetchCompleted(completion) => self.on_completion(completion),
            Event::SpinnerTick => {
                self.state.advance_spinner();
                Step::changed(vec![Effect::ScheduleSpinner {
                    after: SPINNER_INTERVAL,
                }])
            }
            Event::RefreshDue { index } => self.on_refresh_due(index),
        }
    }

    fn on_key(&mut self, key: Key) -> Step {
        match key {
            Key::Quit => Step {
                keep_running: false,
                changed: false,
                effects: Vec::new(),
            },
            Key::Refresh => {
                debug!("manual refresh of all services");
                // Periodic timers are left alone; they keep their schedule.
                let effects = (0..self.config.services.len())
                    .map(|index| {
                        self.state.services[index].begin_fetch();
                        self.dispatch(index)
                    })
                    .collect();
                Step::changed(effects)
            }
            Key::Scroll(scroll) => Step::changed(vec![Effect::Scroll(scroll)]),
        }
    }

    fn on_completion(&mut self, completion: Completion) -> Step {
        let Completion {
            index,
            seq,
            outcome,
            warnings,
        } = completion;

        let Some(latest) = self.latest_applied.get(index).copied() else {
            return Step::unchanged();
        };

        // Warnings are worth showing even when the result itself is stale.
        let warned = !warnings.is_empty();
        if let Some(last) = warnings.into_iter().last() {
            self.state.last_warning = Some(last);
        }

        // Only a result older than the one on screen is stale; a slow fetch
        // overtaken by a newer dispatch still lands if nothing newer has.
        if seq <= latest {
            debug!(index, seq, latest, "dropping stale fetch result");
            return Step {
                changed: warned,
                ..Step::unchanged()
            };
        }

        self.latest_applied[index] = seq;
        if self.state.services[index].apply(outcome) {
            self.state.last_successful_update = Some(Local::now());
        }
        Step::changed(Vec::new())
    }

    fn on_refresh_due(&mut self, index: usize) -> Step {
        if index >= self.config.services.len() {
            return Step::unchanged();
        }
        self.state.services[index].begin_fetch();
        let fetch = self.dispatch(index);
        let reschedule = self.schedule_refresh(index);
        Step::changed(vec![fetch, reschedule])
    }

    fn dispatch(&mut self, index: usize) -> Effect {
        self.next_seq += 1;
        Effect::Fetch {
            index,
            seq: self.next_seq,
        }
    }

    fn schedule_refresh(&mut self, index: usize) -> Effect {
        let resolved = resolve_interval(&self.config.services[index], &self.config);
        if let Some(warning) = resolved.warning {
            warn!("{}", warning);
            self.state.last_warning = Some(warning);
        }
        Effect::ScheduleRefresh {
            index,
            after: resolved.interval,
        }
    }
}
