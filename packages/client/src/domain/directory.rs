//! Room directory abstraction.
//!
//! The roster view depends on this trait rather than on the HTTP client
//! directly, so tests can swap in a mock directory.

use async_trait::async_trait;
use thiserror::Error;

use crate::infrastructure::dto::http::{CreatedRoom, RoomDetail, StoredMessage};

use super::value_object::RoomName;

/// Errors from the room directory transport.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The request failed or the server answered with an error status
    #[error("room directory request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// One-shot room operations against the chat service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Fetch all known room names.
    async fn list(&self) -> Result<Vec<String>, DirectoryError>;

    /// Create a room. The name is already validated; the server's
    /// representation of the new room is returned.
    async fn create(&self, name: &RoomName) -> Result<CreatedRoom, DirectoryError>;

    /// Fetch who is currently connected to a room.
    async fn detail(&self, room: &RoomName) -> Result<RoomDetail, DirectoryError>;

    /// Fetch the stored message history of a room, oldest first.
    async fn history(&self, room: &RoomName) -> Result<Vec<StoredMessage>, DirectoryError>;
}
