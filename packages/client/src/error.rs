//! Top-level client error.

use thiserror::Error;

use crate::domain::{DirectoryError, ValueObjectError};
use crate::infrastructure::ConnectError;

/// Everything `run_client` can fail with.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    InvalidValue(#[from] ValueObjectError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("terminal error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
