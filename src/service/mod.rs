//! Fetch Task: one HTTP poll of a configured service.
//!
//! - `headers`: raw header lines → sendable headers, with `{VAR}` expansion
//! - `extract`: JSON path evaluation over response bodies
//! - `fields`: ordered selector results
//! - `fetch`: the HTTP request itself and its [`Outcome`]

mod extract;
mod fetch;
mod fields;
mod headers;

pub use extract::extract;
pub use fetch::{FETCH_TIMEOUT, FetchError, FetchReport, Fetcher, Outcome, extract_fields};
pub use fields::Fields;
pub use headers::{PreparedHeaders, prepare_headers};
