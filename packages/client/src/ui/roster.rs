//! Room roster view model.
//!
//! Caches the room list, tracks which room is active, and keeps the view
//! consistent by re-fetching after every create. There are no incremental
//! updates; `refresh` is the only way the cache changes.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{DirectoryError, RoomDirectory, RoomName, ValueObjectError};

/// Roster operation failures.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The name was rejected client-side; no request was made
    #[error(transparent)]
    InvalidName(#[from] ValueObjectError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// The list of known rooms with the active one highlighted.
pub struct RoomRoster {
    directory: Arc<dyn RoomDirectory>,
    rooms: Vec<String>,
    active: Option<RoomName>,
}

impl RoomRoster {
    pub fn new(directory: Arc<dyn RoomDirectory>) -> Self {
        Self {
            directory,
            rooms: Vec::new(),
            active: None,
        }
    }

    /// Re-fetch the full room list.
    pub async fn refresh(&mut self) -> Result<(), RosterError> {
        self.rooms = self.directory.list().await?;
        Ok(())
    }

    /// Create a room, then re-fetch the list so the view includes it.
    ///
    /// Invalid names (empty, whitespace, `/`) are rejected before any
    /// request is made.
    pub async fn create(&mut self, name: &str) -> Result<(), RosterError> {
        let room = RoomName::new(name.to_string())?;
        self.directory.create(&room).await?;
        self.refresh().await
    }

    /// Mark a room as the active one.
    pub fn mark_active(&mut self, room: &RoomName) {
        self.active = Some(room.clone());
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn active(&self) -> Option<&RoomName> {
        self.active.as_ref()
    }

    /// Render one line per room, `*` marking the active one.
    pub fn render_lines(&self) -> Vec<String> {
        self.rooms
            .iter()
            .map(|room| {
                let marker = match &self.active {
                    Some(active) if active.as_str() == room => '*',
                    _ => ' ',
                };
                format!("{} {}", marker, room)
            })
            .collect()
    }
}
