//! Dashboard state owned by the orchestrator.

use std::time::Duration;

use chrono::{DateTime, Local};

use crate::service::{FetchError, Fields, Outcome};

/// Number of spinner animation frames.
pub const SPINNER_FRAMES: usize = 10;

/// Rows taken by the header and footer, margins included.
const CHROME_HEIGHT: u16 = 6;

/// Last known status of one service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceState {
    pub loading: bool,
    /// One entry per configured selector after a successful fetch, empty
    /// otherwise.
    pub fields: Fields,
    pub error: Option<String>,
    pub http_status: Option<u16>,
    pub latency: Option<Duration>,
}

impl ServiceState {
    /// State before the first fetch completes.
    pub fn pending() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Marks a new fetch as in flight. Fields, status and latency of the
    /// previous fetch stay visible until it completes.
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Records a completed fetch. Returns `true` on success.
    pub fn apply(&mut self, outcome: Outcome) -> bool {
        self.loading = false;
        match outcome {
            Outcome::Success {
                fields,
                http_status,
                latency,
            } => {
                self.error = None;
                self.fields = fields;
                self.http_status = Some(http_status);
                self.latency = Some(latency);
                true
            }
            Outcome::Failure {
                error,
                http_status,
                latency,
            } => {
                let sent = !matches!(error, FetchError::Build(_));
                self.error = Some(error.to_string());
                self.fields = Fields::new();
                self.http_status = http_status;
                self.latency = sent.then_some(latency);
                false
            }
        }
    }
}

/// Snapshot rendered by the front end.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Aligned by index with the configured services.
    pub services: Vec<ServiceState>,
    /// Set whenever any service completes without error.
    pub last_successful_update: Option<DateTime<Local>>,
    /// Always in `0..SPINNER_FRAMES`.
    pub spinner_frame: usize,
    /// Most recent non-fatal warning (bad header line, bad interval).
    pub last_warning: Option<String>,
}

impl DashboardState {
    pub fn new(service_count: usize) -> Self {
        Self {
            services: vec![ServiceState::pending(); service_count],
            last_successful_update: None,
            spinner_frame: 0,
            last_warning: None,
        }
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES;
    }
}

/// Terminal dimensions from the latest resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
}

impl Layout {
    /// Rows left for the scrollable service list.
    pub fn viewport_height(&self) -> u16 {
        self.height.saturating_sub(CHROME_HEIGHT)
    }
}
