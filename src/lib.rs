//! charming - terminal dashboard for HTTP service health.
//!
//! Polls a configured set of JSON endpoints on independent intervals,
//! extracts selected fields from each response and shows them in a
//! scrollable TUI.
//!
//! - [`config`] loads the JSON configuration
//! - [`service`] performs one poll of a service
//! - [`poll`] owns dashboard state and schedules work
//! - [`view`] and [`tui`] present it

pub mod config;
pub mod poll;
pub mod service;
pub mod tui;
pub mod util;
pub mod view;
