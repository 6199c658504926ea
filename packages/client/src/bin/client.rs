//! Terminal chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin palaver-client -- --username ann
//! ```

use clap::Parser;

use palaver_client::cli::ClientArgs;
use palaver_shared::logging::setup_logger;

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = ClientArgs::parse();
    if let Err(e) = palaver_client::run_client(args).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
