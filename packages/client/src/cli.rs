//! Command line arguments.

use clap::Parser;

/// Terminal chat client: list and create rooms, join one at a time, talk.
#[derive(Debug, Parser)]
#[command(name = "palaver-client", version, about)]
pub struct ClientArgs {
    /// Chat service host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Chat service port
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Use https/wss instead of http/ws
    #[arg(long, default_value_t = false)]
    pub secure: bool,

    /// Display name for this session
    #[arg(long)]
    pub username: String,
}

impl ClientArgs {
    /// Base URL for the room API, e.g. `http://127.0.0.1:8080`.
    pub fn http_base(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    /// Base URL for the realtime endpoint, e.g. `ws://127.0.0.1:8080`.
    pub fn ws_base(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}
