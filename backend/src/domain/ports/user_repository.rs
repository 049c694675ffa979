//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{SessionId, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Result of a conditional user insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInsertOutcome {
    /// The user row was written.
    Inserted,
    /// Another user already owns the e-mail address; nothing was written.
    EmailTaken,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user unless the e-mail address is already registered.
    ///
    /// The check and the write must be a single atomic statement.
    async fn insert_if_email_available(
        &self,
        user: &User,
    ) -> Result<UserInsertOutcome, UserPersistenceError>;

    /// Fetch the earliest user registered under `session_id`.
    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<User>, UserPersistenceError>;
}
