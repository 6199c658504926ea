//! Turn events into printable lines.

use palaver_shared::time::format_clock;

use crate::infrastructure::ConnectionEvent;
use crate::infrastructure::dto::websocket::ServerEvent;

/// Render a decoded server frame. Chat messages show sender and clock;
/// join/leave show the server's presence text when present.
pub fn render_frame(event: &ServerEvent) -> String {
    match event {
        ServerEvent::Message {
            username,
            content,
            timestamp,
            ..
        } => format!("[{}] {}: {}", format_clock(*timestamp), username, content),
        ServerEvent::Join {
            username,
            content,
            timestamp,
            ..
        } => {
            let text = content
                .clone()
                .unwrap_or_else(|| format!("{} joined the room", username));
            format!("[{}] * {}", format_clock(*timestamp), text)
        }
        ServerEvent::Leave {
            username,
            content,
            timestamp,
            ..
        } => {
            let text = content
                .clone()
                .unwrap_or_else(|| format!("{} left the room", username));
            format!("[{}] * {}", format_clock(*timestamp), text)
        }
    }
}

/// Render a connection event for the prompt.
pub fn render_event(event: &ConnectionEvent) -> String {
    match event {
        ConnectionEvent::Opened { room } => format!("-- connected to room '{}' --", room),
        ConnectionEvent::Frame(frame) => render_frame(frame),
        ConnectionEvent::Error { room, reason } => {
            format!("-- connection error in room '{}': {} --", room, reason)
        }
        ConnectionEvent::Closed { room } => format!("-- disconnected from room '{}' --", room),
    }
}

/// Render one stored history record the same way a live frame renders.
pub fn render_stored(username: &str, content: &str, kind: &str, timestamp: i64) -> String {
    match kind {
        "message" => format!("[{}] {}: {}", format_clock(timestamp), username, content),
        _ => format!("[{}] * {}", format_clock(timestamp), content),
    }
}
