//! Client-local session identity.

use super::{
    error::ValueObjectError,
    value_object::{UserId, Username},
};

/// Factory for generating UserId instances.
///
/// Separates the generation concern from the validation logic in UserId.
pub struct UserIdFactory;

impl UserIdFactory {
    /// Generate a new UserId from a random UUID v4.
    ///
    /// # Errors
    ///
    /// Should not fail in practice, but returns Result for consistency
    /// with the domain error handling pattern.
    pub fn generate() -> Result<UserId, ValueObjectError> {
        let uuid = uuid::Uuid::new_v4();
        UserId::new(uuid.to_string())
    }
}

/// The local client's identity: `{user_id, username}`.
///
/// Generated at login and held only in memory; nothing is persisted, so a
/// new process gets a new identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Randomly generated user identifier
    pub user_id: UserId,
    /// Display name chosen at login
    pub username: Username,
}

impl Session {
    /// Log in with the given display name, generating a fresh user id.
    ///
    /// # Errors
    ///
    /// Returns an error if id generation fails validation (not expected
    /// in practice).
    pub fn log_in(username: Username) -> Result<Self, ValueObjectError> {
        Ok(Self {
            user_id: UserIdFactory::generate()?,
            username,
        })
    }
}
