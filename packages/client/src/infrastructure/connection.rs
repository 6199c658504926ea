//! WebSocket connection manager.
//!
//! Owns the single "current connection" slot for a client session. At most
//! one connection is open at any time: joining a room tears down the prior
//! connection before the new one is requested. There is no reconnect
//! transition and no retry; a failed or dropped connection stays closed
//! until the user selects a room again.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, Message},
};

use crate::domain::{MessageContent, RoomName, Session};

use super::dto::websocket::{self, ServerEvent};

/// How long to wait for the writer task to flush the close frame.
const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// Connection lifecycle: `Closed → Connecting → Open → Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection; also the terminal state after any failure
    Closed,
    /// Handshake in progress
    Connecting,
    /// Frames can be sent and received
    Open,
}

/// The four-event contract of a connection, delivered in arrival order.
#[derive(Debug)]
pub enum ConnectionEvent {
    /// The connection to `room` is established
    Opened { room: RoomName },
    /// A decoded server frame
    Frame(ServerEvent),
    /// The transport reported an error; the connection is about to close
    Error { room: RoomName, reason: String },
    /// The connection is gone, emitted exactly once per connection
    Closed { room: RoomName },
}

/// Errors establishing a connection.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("websocket handshake for room '{room}' failed: {source}")]
    Handshake {
        room: RoomName,
        #[source]
        source: tungstenite::Error,
    },
}

struct ActiveConnection {
    room: RoomName,
    outbound: mpsc::UnboundedSender<Message>,
    /// True while the transport is usable. Whoever flips it true→false
    /// emits the single `Closed` event for this connection.
    open: Arc<AtomicBool>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

/// Owns the current-connection slot and the event channel feeding the UI.
pub struct ConnectionManager {
    ws_base: String,
    session: Session,
    events: mpsc::UnboundedSender<ConnectionEvent>,
    current: Option<ActiveConnection>,
    state: ConnectionState,
}

impl ConnectionManager {
    /// `ws_base` is scheme + authority, e.g. `ws://127.0.0.1:8080`.
    ///
    /// Returns the manager and the receiving end of its event channel.
    pub fn new(
        ws_base: String,
        session: Session,
    ) -> (Self, mpsc::UnboundedReceiver<ConnectionEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let manager = Self {
            ws_base,
            session,
            events,
            current: None,
            state: ConnectionState::Closed,
        };
        (manager, rx)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        match &self.current {
            Some(conn) if conn.open.load(Ordering::SeqCst) => ConnectionState::Open,
            Some(_) => ConnectionState::Closed,
            None => self.state,
        }
    }

    /// The room the current connection is addressed to, if any.
    pub fn current_room(&self) -> Option<&RoomName> {
        self.current.as_ref().map(|conn| &conn.room)
    }

    /// Join a room: close any existing connection, then open a new one
    /// addressed by room name with the session identity as query
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::Handshake`] if the connection cannot be
    /// established. No retry is attempted; the manager stays `Closed` and
    /// the caller must join again to try once more.
    pub async fn join(&mut self, room: &RoomName) -> Result<(), ConnectError> {
        self.leave().await;
        self.state = ConnectionState::Connecting;

        let url = format!(
            "{}/ws/{}?user_id={}&username={}",
            self.ws_base, room, self.session.user_id, self.session.username
        );
        tracing::debug!("connecting to {}", url);

        let (stream, _response) = match connect_async(url.as_str()).await {
            Ok(ok) => ok,
            Err(source) => {
                self.state = ConnectionState::Closed;
                tracing::error!("failed to connect to room '{}': {}", room, source);
                let _ = self.events.send(ConnectionEvent::Error {
                    room: room.clone(),
                    reason: source.to_string(),
                });
                return Err(ConnectError::Handshake {
                    room: room.clone(),
                    source,
                });
            }
        };

        let (mut sink, mut ws_stream) = stream.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<Message>();
        let open = Arc::new(AtomicBool::new(true));

        // Opened goes on the channel before the reader task exists, so no
        // server frame can overtake it.
        let _ = self.events.send(ConnectionEvent::Opened { room: room.clone() });

        let writer = tokio::spawn(async move {
            while let Some(message) = outbound_rx.recv().await {
                let is_close = matches!(message, Message::Close(_));
                if sink.send(message).await.is_err() || is_close {
                    break;
                }
            }
        });

        let events = self.events.clone();
        let reader_open = Arc::clone(&open);
        let reader_room = room.clone();
        let reader = tokio::spawn(async move {
            while let Some(frame) = ws_stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => match websocket::decode(text.as_str()) {
                        Ok(event) => {
                            let _ = events.send(ConnectionEvent::Frame(event));
                        }
                        Err(e) => {
                            tracing::warn!("discarding frame from '{}': {}", reader_room, e);
                        }
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!("websocket error in room '{}': {}", reader_room, e);
                        let _ = events.send(ConnectionEvent::Error {
                            room: reader_room.clone(),
                            reason: e.to_string(),
                        });
                        break;
                    }
                }
            }
            if reader_open.swap(false, Ordering::SeqCst) {
                let _ = events.send(ConnectionEvent::Closed { room: reader_room });
            }
        });

        self.current = Some(ActiveConnection {
            room: room.clone(),
            outbound,
            open,
            reader,
            writer,
        });
        self.state = ConnectionState::Open;
        tracing::info!("connected to room '{}'", room);
        Ok(())
    }

    /// Send chat text over the current connection.
    ///
    /// Transmits only while the connection is open; otherwise the input is
    /// silently dropped: no queueing, no error to the user. Returns
    /// whether a frame was handed to the transport.
    pub fn send(&self, text: &str) -> bool {
        let Some(conn) = &self.current else {
            tracing::debug!("dropping outbound text: no connection");
            return false;
        };
        if !conn.open.load(Ordering::SeqCst) {
            tracing::debug!("dropping outbound text: connection not open");
            return false;
        }
        let content = match MessageContent::new(text.to_string()) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("dropping outbound text: {}", e);
                return false;
            }
        };
        let frame = match websocket::encode(&content) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("failed to encode outbound text: {}", e);
                return false;
            }
        };
        conn.outbound.send(Message::Text(frame.into())).is_ok()
    }

    /// Tear down the current connection, if any.
    ///
    /// Flushes a close frame, stops both tasks, and emits `Closed` unless
    /// the reader already did so for a remote close.
    pub async fn leave(&mut self) {
        if let Some(conn) = self.current.take() {
            let was_open = conn.open.swap(false, Ordering::SeqCst);
            let _ = conn.outbound.send(Message::Close(None));
            drop(conn.outbound);
            conn.reader.abort();
            if tokio::time::timeout(CLOSE_GRACE, conn.writer).await.is_err() {
                tracing::warn!("writer for room '{}' did not flush in time", conn.room);
            }
            if was_open {
                let _ = self.events.send(ConnectionEvent::Closed { room: conn.room });
            }
        }
        self.state = ConnectionState::Closed;
    }
}
