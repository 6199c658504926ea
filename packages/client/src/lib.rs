//! Terminal chat client for a room-based chat service.
//!
//! The service exposes a REST room roster and a per-room WebSocket
//! endpoint; this crate owns the client side of both: a connection
//! manager holding at most one open connection, the JSON envelope codec,
//! and the roster view, wired into an interactive prompt.

pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

pub use error::ClientError;
pub use ui::run_client;
