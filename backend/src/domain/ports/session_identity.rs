//! Driving port resolving a session identifier to the caller behind it.

use async_trait::async_trait;

use crate::domain::{CallerIdentity, Error, SessionId};

/// Resolve the session carried by a request into a [`CallerIdentity`].
///
/// Unknown sessions fail with [`crate::domain::ErrorCode::Unauthorized`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionIdentity: Send + Sync {
    async fn resolve(&self, session_id: SessionId) -> Result<CallerIdentity, Error>;
}
