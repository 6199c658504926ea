//! Interactive prompt loop.
//!
//! One blocking thread owns the readline editor and feeds lines into the
//! async loop; connection events interleave with the prompt through the
//! editor's external printer.

use std::sync::Arc;

use rustyline::{DefaultEditor, ExternalPrinter, error::ReadlineError};
use tokio::sync::mpsc;

use crate::cli::ClientArgs;
use crate::domain::{RoomDirectory, RoomName, Session, Username};
use crate::error::ClientError;
use crate::infrastructure::{ConnectionManager, HttpRoomDirectory};

use super::render;
use super::roster::{RoomRoster, RosterError};

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListRooms,
    CreateRoom(String),
    JoinRoom(String),
    Who,
    History,
    Quit,
    Say(String),
    Nothing,
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::Nothing;
        }
        if let Some(rest) = trimmed.strip_prefix('/') {
            let mut parts = rest.splitn(2, char::is_whitespace);
            let verb = parts.next().unwrap_or("");
            let arg = parts.next().unwrap_or("").trim().to_string();
            return match verb {
                "rooms" => Self::ListRooms,
                "create" => Self::CreateRoom(arg),
                "join" => Self::JoinRoom(arg),
                "who" => Self::Who,
                "history" => Self::History,
                "quit" => Self::Quit,
                _ => Self::Unknown(verb.to_string()),
            };
        }
        Self::Say(trimmed.to_string())
    }
}

/// Run the client until the user quits or input ends.
///
/// # Errors
///
/// Fails on an invalid username or a broken terminal; everything that can
/// happen mid-session (network errors, malformed frames) is reported and
/// survived.
pub async fn run_client(args: ClientArgs) -> Result<(), ClientError> {
    let username = Username::new(args.username.clone())?;
    let session = Session::log_in(username)?;
    tracing::info!("logged in as '{}' ({})", session.username, session.user_id);

    let directory: Arc<dyn RoomDirectory> = Arc::new(HttpRoomDirectory::new(args.http_base()));
    let mut roster = RoomRoster::new(Arc::clone(&directory));
    let (mut manager, mut events) = ConnectionManager::new(args.ws_base(), session.clone());

    let mut rl = DefaultEditor::new()?;
    let mut printer = rl.create_external_printer()?;

    println!(
        "logged in as {}. commands: /rooms /create <name> /join <room> /who /history /quit",
        session.username
    );
    match roster.refresh().await {
        Ok(()) => {
            for line in roster.render_lines() {
                println!("{line}");
            }
        }
        Err(e) => tracing::error!("failed to fetch rooms: {}", e),
    }

    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        loop {
            match rl.readline("> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("readline error: {}", e);
                    break;
                }
            }
        }
    });

    loop {
        tokio::select! {
            maybe_line = line_rx.recv() => {
                let Some(line) = maybe_line else { break };
                let keep_going =
                    handle_line(&line, &directory, &mut roster, &mut manager, &mut printer).await;
                if !keep_going {
                    break;
                }
            }
            maybe_event = events.recv() => {
                if let Some(event) = maybe_event {
                    let _ = printer.print(render::render_event(&event));
                }
            }
        }
    }

    manager.leave().await;
    Ok(())
}

/// Dispatch one input line. Returns false when the session should end.
///
/// Form-validation failures (empty message, empty or invalid room name)
/// perform no operation and print nothing; they are logged at debug level.
async fn handle_line<P: ExternalPrinter>(
    line: &str,
    directory: &Arc<dyn RoomDirectory>,
    roster: &mut RoomRoster,
    manager: &mut ConnectionManager,
    printer: &mut P,
) -> bool {
    match Command::parse(line) {
        Command::Nothing => {}
        Command::Quit => return false,
        Command::ListRooms => match roster.refresh().await {
            Ok(()) => {
                for room_line in roster.render_lines() {
                    let _ = printer.print(room_line);
                }
            }
            Err(e) => tracing::error!("failed to fetch rooms: {}", e),
        },
        Command::CreateRoom(name) => match roster.create(&name).await {
            Ok(()) => {
                for room_line in roster.render_lines() {
                    let _ = printer.print(room_line);
                }
            }
            Err(RosterError::InvalidName(e)) => tracing::debug!("ignoring create: {}", e),
            Err(e) => tracing::error!("failed to create room: {}", e),
        },
        Command::JoinRoom(name) => match RoomName::new(name) {
            Ok(room) => match manager.join(&room).await {
                Ok(()) => roster.mark_active(&room),
                // no retry: the user re-selects the room to try again
                Err(e) => tracing::error!("{}", e),
            },
            Err(e) => tracing::debug!("ignoring join: {}", e),
        },
        Command::Who => {
            let Some(room) = manager.current_room().cloned() else {
                let _ = printer.print("join a room first".to_string());
                return true;
            };
            match directory.detail(&room).await {
                Ok(detail) => {
                    let _ = printer.print(format!(
                        "in room '{}': {}",
                        room,
                        detail.clients.join(", ")
                    ));
                }
                Err(e) => tracing::error!("failed to fetch room detail: {}", e),
            }
        }
        Command::History => {
            let Some(room) = manager.current_room().cloned() else {
                let _ = printer.print("join a room first".to_string());
                return true;
            };
            match directory.history(&room).await {
                Ok(messages) => {
                    for message in &messages {
                        let _ = printer.print(render::render_stored(
                            &message.username,
                            &message.content,
                            &message.r#type,
                            message.timestamp,
                        ));
                    }
                }
                Err(e) => tracing::error!("failed to fetch history: {}", e),
            }
        }
        Command::Unknown(verb) => {
            let _ = printer.print(format!("unknown command: /{verb}"));
        }
        Command::Say(text) => {
            // transmits only while open; otherwise dropped, not queued
            if !manager.send(&text) {
                tracing::debug!("message dropped: not connected");
            }
        }
    }
    true
}
