//! Events consumed by the orchestrator and effects it asks for.

use std::time::Duration;

use crate::service::Outcome;

/// Viewport navigation. Not interpreted by the orchestrator, only handed
/// back to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    Top,
    Bottom,
}

/// User input after key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Quit,
    Refresh,
    Scroll(Scroll),
}

/// Result of one fetch task, tagged with the dispatch it answers.
#[derive(Debug, Clone)]
pub struct Completion {
    pub index: usize,
    pub seq: u64,
    pub outcome: Outcome,
    /// Non-fatal problems found while preparing the request.
    pub warnings: Vec<String>,
}

/// Everything that can happen to the dashboard.
#[derive(Debug, Clone)]
pub enum Event {
    Resize { width: u16, height: u16 },
    Input(Key),
    FetchCompleted(Completion),
    SpinnerTick,
    RefreshDue { index: usize },
}

/// Work the orchestrator wants done outside the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start a fetch task for a service.
    Fetch { index: usize, seq: u64 },
    /// Deliver `RefreshDue { index }` once, `after` from now.
    ScheduleRefresh { index: usize, after: Duration },
    /// Deliver `SpinnerTick` once, `after` from now.
    ScheduleSpinner { after: Duration },
    /// Forward navigation to the viewport.
    Scroll(Scroll),
}
