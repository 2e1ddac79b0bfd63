//! Polling core: state, events, scheduling and the event loop logic.

mod dispatcher;
mod event;
mod orchestrator;
mod scheduler;
mod state;

pub use dispatcher::Dispatcher;
pub use event::{Completion, Effect, Event, Key, Scroll};
pub use orchestrator::{Orchestrator, Step};
pub use scheduler::{
    FALLBACK_REFRESH_INTERVAL, ResolvedInterval, SPINNER_INTERVAL, arm_timer, resolve_interval,
};
pub use state::{DashboardState, Layout, SPINNER_FRAMES, ServiceState};
