//! HTTP implementation of the room directory.

use async_trait::async_trait;

use crate::domain::{DirectoryError, RoomDirectory, RoomName};

use super::dto::http::{
    CreateRoomRequest, CreatedRoom, MessageHistory, RoomDetail, RoomsResponse, StoredMessage,
};

/// Reqwest-backed [`RoomDirectory`] talking to `<base_url>/api/rooms`.
pub struct HttpRoomDirectory {
    base_url: String,
    http: reqwest::Client,
}

impl HttpRoomDirectory {
    /// `base_url` is scheme + authority, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RoomDirectory for HttpRoomDirectory {
    async fn list(&self) -> Result<Vec<String>, DirectoryError> {
        let url = format!("{}/api/rooms", self.base_url);
        let body: RoomsResponse = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.rooms)
    }

    async fn create(&self, name: &RoomName) -> Result<CreatedRoom, DirectoryError> {
        let url = format!("{}/api/rooms", self.base_url);
        let request = CreateRoomRequest {
            name: name.as_str().to_string(),
        };
        let created = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(created)
    }

    async fn detail(&self, room: &RoomName) -> Result<RoomDetail, DirectoryError> {
        let url = format!("{}/api/rooms/{}", self.base_url, room);
        let detail = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(detail)
    }

    async fn history(&self, room: &RoomName) -> Result<Vec<StoredMessage>, DirectoryError> {
        let url = format!("{}/api/rooms/{}/messages", self.base_url, room);
        let body: MessageHistory = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.messages)
    }
}
