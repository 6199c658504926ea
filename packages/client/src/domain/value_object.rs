//! Value objects for the client domain.
//!
//! Value objects are immutable and compared by value. Each constructor
//! validates, so anything that made it into one of these types is safe to
//! put on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length for identifiers (user id, username, room name).
const MAX_IDENT_LEN: usize = 100;

/// Maximum length for a chat message body.
const MAX_CONTENT_LEN: usize = 10_000;

/// User identifier value object.
///
/// Generated at login; tags every action the client takes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId.
    ///
    /// # Errors
    ///
    /// Returns an error when the id is empty or longer than 100 characters.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::UserIdEmpty);
        }
        let len = id.len();
        if len > MAX_IDENT_LEN {
            return Err(ValueObjectError::UserIdTooLong {
                max: MAX_IDENT_LEN,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Username value object.
///
/// Travels as a WebSocket query parameter, so whitespace and `/` are
/// rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new Username.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is empty, longer than 100
    /// characters, or contains whitespace or `/`.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let len = name.len();
        if len > MAX_IDENT_LEN {
            return Err(ValueObjectError::UsernameTooLong {
                max: MAX_IDENT_LEN,
                actual: len,
            });
        }
        if name.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(ValueObjectError::UsernameInvalidChar(name));
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room name value object.
///
/// Rooms are identified by name, unique within the server's room set. The
/// name travels as a WebSocket path segment, so whitespace and `/` are
/// rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is empty, longer than 100
    /// characters, or contains whitespace or `/`.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = name.len();
        if len > MAX_IDENT_LEN {
            return Err(ValueObjectError::RoomNameTooLong {
                max: MAX_IDENT_LEN,
                actual: len,
            });
        }
        if name.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(ValueObjectError::RoomNameInvalidChar(name));
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message content value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent.
    ///
    /// # Errors
    ///
    /// Returns an error when the content is empty or longer than 10000
    /// characters.
    pub fn new(content: String) -> Result<Self, ValueObjectError> {
        if content.is_empty() {
            return Err(ValueObjectError::MessageContentEmpty);
        }
        let len = content.len();
        if len > MAX_CONTENT_LEN {
            return Err(ValueObjectError::MessageContentTooLong {
                max: MAX_CONTENT_LEN,
                actual: len,
            });
        }
        Ok(Self(content))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
