//! Infrastructure layer: wire DTOs and the two transports (HTTP room
//! directory, WebSocket connection manager).

pub mod connection;
pub mod dto;
pub mod http;

pub use connection::{ConnectError, ConnectionEvent, ConnectionManager, ConnectionState};
pub use http::HttpRoomDirectory;
