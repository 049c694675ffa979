//! Driving port for user registration.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, SessionId, UserId, UserName};

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    /// Session already carried by the client, if any.
    pub session_id: Option<SessionId>,
    pub name: UserName,
    pub email: EmailAddress,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterUserResponse {
    pub user_id: UserId,
    pub session_id: SessionId,
    /// True when `session_id` was generated for this request and the
    /// adapter must hand it to the client.
    pub session_issued: bool,
}

/// Driving port for creating users.
///
/// Duplicate e-mail addresses fail with [`crate::domain::ErrorCode::Unauthorized`]
/// and leave both the store and the caller's session untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisterUserResponse, Error>;
}
