//! Wire shapes exchanged with the chat service.

pub mod http;
pub mod websocket;
