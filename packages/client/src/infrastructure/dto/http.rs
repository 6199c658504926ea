//! Room API request/response shapes.

use serde::{Deserialize, Serialize};

/// `GET /api/rooms` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomsResponse {
    pub rooms: Vec<String>,
}

/// `POST /api/rooms` request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
}

/// `POST /api/rooms` response: the server's representation of the new room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedRoom {
    pub room_id: String,
    pub name: String,
}

/// `GET /api/rooms/:room` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetail {
    pub room_id: String,
    /// Display names of the currently connected clients
    pub clients: Vec<String>,
}

/// One record from the stored message history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: i64,
    pub room_id: String,
    pub user_id: String,
    pub username: String,
    pub content: String,
    pub r#type: String,
    /// Unix milliseconds
    pub timestamp: i64,
}

/// `GET /api/rooms/:room/messages` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageHistory {
    pub messages: Vec<StoredMessage>,
}
