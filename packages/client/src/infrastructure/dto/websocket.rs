//! WebSocket envelope codec.
//!
//! Server frames are a tagged union over `{join, leave, message}`;
//! outgoing frames carry only the content; the server attaches identity,
//! type, and timestamp.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::MessageContent;

/// Codec failures. A decode failure is fatal to that frame only, never to
/// the connection.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed server frame: {0}")]
    Decode(serde_json::Error),

    #[error("failed to encode outbound frame: {0}")]
    Encode(serde_json::Error),
}

/// A decoded server frame.
///
/// Frames may carry fields beyond these (`room_id`); they are ignored.
/// `timestamp` is server-assigned Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerEvent {
    /// A participant joined the room
    Join {
        user_id: String,
        username: String,
        /// Server-built presence text ("Ann joined the room")
        #[serde(default)]
        content: Option<String>,
        timestamp: i64,
    },
    /// A participant left the room
    Leave {
        user_id: String,
        username: String,
        /// Server-built presence text ("Ann left the room")
        #[serde(default)]
        content: Option<String>,
        timestamp: i64,
    },
    /// A chat message
    Message {
        user_id: String,
        username: String,
        content: String,
        timestamp: i64,
    },
}

/// The single-field envelope the client sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundFrame {
    pub content: String,
}

/// Encode user text for transmission.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode(content: &MessageContent) -> Result<String, CodecError> {
    let frame = OutboundFrame {
        content: content.as_str().to_string(),
    };
    serde_json::to_string(&frame).map_err(CodecError::Encode)
}

/// Decode an incoming frame, dispatching on the `type` discriminator.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for invalid JSON, an unknown `type`, or
/// missing fields.
pub fn decode(text: &str) -> Result<ServerEvent, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}
