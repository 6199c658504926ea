//! Shared utilities for Palaver binaries.
//!
//! Keeps logger setup and the wire clock out of the client crate
//! itself.

pub mod logging;
pub mod time;

pub use logging::setup_logger;
pub use time::{format_clock, now_millis};
