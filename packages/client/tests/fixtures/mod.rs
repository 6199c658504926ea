//! In-process chat service fixture.
//!
//! A minimal room API plus broadcast hub, bound to an ephemeral port, so
//! the integration tests drive the client against a real WebSocket peer.

use std::{
    collections::{BTreeSet, HashMap},
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::{any, get},
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
    time::timeout,
};

use palaver_client::infrastructure::ConnectionEvent;
use palaver_shared::time::now_millis;

const EVENT_WAIT: Duration = Duration::from_secs(5);

/// Receive the next connection event or fail the test.
pub async fn next_event(rx: &mut mpsc::UnboundedReceiver<ConnectionEvent>) -> ConnectionEvent {
    timeout(EVENT_WAIT, rx.recv())
        .await
        .expect("timed out waiting for connection event")
        .expect("event channel closed")
}

#[derive(Debug, Deserialize)]
struct Identity {
    user_id: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct CreateRoomBody {
    name: String,
}

struct Peer {
    username: String,
    sender: mpsc::UnboundedSender<String>,
}

struct Hub {
    rooms: Mutex<BTreeSet<String>>,
    /// room -> user_id -> peer
    peers: Mutex<HashMap<String, HashMap<String, Peer>>>,
    /// room -> stored envelopes, oldest first
    messages: Mutex<HashMap<String, Vec<Value>>>,
    next_id: AtomicI64,
}

impl Hub {
    fn new() -> Self {
        Self {
            rooms: Mutex::new(BTreeSet::from(["lobby".to_string()])),
            peers: Mutex::new(HashMap::new()),
            messages: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn envelope(
        &self,
        kind: &str,
        room: &str,
        user_id: &str,
        username: &str,
        content: String,
    ) -> Value {
        json!({
            "id": self.next_id.fetch_add(1, Ordering::SeqCst),
            "type": kind,
            "room_id": room,
            "user_id": user_id,
            "username": username,
            "content": content,
            "timestamp": now_millis(),
        })
    }

    /// Store the envelope, then fan it out to everyone in the room.
    async fn broadcast(&self, room: &str, frame: Value) {
        let text = frame.to_string();
        {
            let mut messages = self.messages.lock().await;
            messages.entry(room.to_string()).or_default().push(frame);
        }
        let peers = self.peers.lock().await;
        if let Some(members) = peers.get(room) {
            for peer in members.values() {
                let _ = peer.sender.send(text.clone());
            }
        }
    }
}

async fn list_rooms(State(hub): State<Arc<Hub>>) -> Json<Value> {
    let rooms: Vec<String> = hub.rooms.lock().await.iter().cloned().collect();
    Json(json!({ "rooms": rooms }))
}

async fn create_room(State(hub): State<Arc<Hub>>, Json(body): Json<CreateRoomBody>) -> Json<Value> {
    hub.rooms.lock().await.insert(body.name.clone());
    Json(json!({ "room_id": body.name, "name": body.name }))
}

async fn room_detail(State(hub): State<Arc<Hub>>, Path(room_id): Path<String>) -> Json<Value> {
    let peers = hub.peers.lock().await;
    let clients: Vec<String> = peers
        .get(&room_id)
        .map(|members| members.values().map(|p| p.username.clone()).collect())
        .unwrap_or_default();
    Json(json!({ "room_id": room_id, "clients": clients, "messages": [] }))
}

async fn room_history(State(hub): State<Arc<Hub>>, Path(room_id): Path<String>) -> Json<Value> {
    let messages = hub.messages.lock().await;
    let all = messages.get(&room_id).cloned().unwrap_or_default();
    let start = all.len().saturating_sub(50);
    let recent = all[start..].to_vec();
    Json(json!({ "messages": recent }))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    Query(identity): Query<Identity>,
    State(hub): State<Arc<Hub>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, hub, room_id, identity))
}

async fn handle_socket(socket: WebSocket, hub: Arc<Hub>, room_id: String, identity: Identity) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    hub.rooms.lock().await.insert(room_id.clone());
    hub.peers.lock().await.entry(room_id.clone()).or_default().insert(
        identity.user_id.clone(),
        Peer {
            username: identity.username.clone(),
            sender: tx,
        },
    );

    let join_frame = hub.envelope(
        "join",
        &room_id,
        &identity.user_id,
        &identity.username,
        format!("{} joined the room", identity.username),
    );
    hub.broadcast(&room_id, join_frame).await;

    let mut send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let recv_hub = Arc::clone(&hub);
    let recv_room = room_id.clone();
    let recv_user_id = identity.user_id.clone();
    let recv_username = identity.username.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => {
                    let Ok(value) = serde_json::from_str::<Value>(&text) else {
                        continue;
                    };
                    let Some(content) = value.get("content").and_then(Value::as_str) else {
                        continue;
                    };
                    let frame = recv_hub.envelope(
                        "message",
                        &recv_room,
                        &recv_user_id,
                        &recv_username,
                        content.to_string(),
                    );
                    recv_hub.broadcast(&recv_room, frame).await;
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    if let Some(members) = hub.peers.lock().await.get_mut(&room_id) {
        members.remove(&identity.user_id);
    }
    let leave_frame = hub.envelope(
        "leave",
        &room_id,
        &identity.user_id,
        &identity.username,
        format!("{} left the room", identity.username),
    );
    hub.broadcast(&room_id, leave_frame).await;
}

fn router(hub: Arc<Hub>) -> Router {
    Router::new()
        .route("/api/rooms", get(list_rooms).post(create_room))
        .route("/api/rooms/{room_id}", get(room_detail))
        .route("/api/rooms/{room_id}/messages", get(room_history))
        .route("/ws/{room_id}", any(ws_handler))
        .with_state(hub)
}

/// The fixture service bound to an ephemeral local port.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fixture listener");
        let addr = listener.local_addr().expect("fixture listener addr");
        let app = router(Arc::new(Hub::new()));
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fixture server");
        });
        Self { addr, handle }
    }

    pub fn http_base(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_base(&self) -> String {
        format!("ws://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
