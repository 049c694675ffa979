//! User registration and session resolution services.
//!
//! Both services sit on top of the [`UserRepository`] port: registration
//! writes users, session resolution reads them back by session.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    RegisterUserRequest, RegisterUserResponse, SessionIdentity, UserInsertOutcome,
    UserPersistenceError, UserRegistration, UserRepository,
};
use crate::domain::{CallerIdentity, Error, SessionId, User, UserDraft, UserId};

/// Message returned when an e-mail address is already registered.
pub const USER_EXISTS_MESSAGE: &str = "User already exists";

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Registration service implementing [`UserRegistration`].
#[derive(Clone)]
pub struct UserRegistrationService<R> {
    user_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserRegistrationService<R> {
    pub fn new(user_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }
}

#[async_trait]
impl<R> UserRegistration for UserRegistrationService<R>
where
    R: UserRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisterUserResponse, Error> {
        let RegisterUserRequest {
            session_id,
            name,
            email,
        } = request;
        let session_issued = session_id.is_none();
        let session_id = session_id.unwrap_or_else(SessionId::random);
        let now = self.clock.utc();
        let user = User::new(UserDraft {
            id: UserId::random(),
            session_id,
            name,
            email,
            created_at: now,
            updated_at: now,
        });

        let outcome = self
            .user_repo
            .insert_if_email_available(&user)
            .await
            .map_err(map_persistence_error)?;

        match outcome {
            UserInsertOutcome::Inserted => {
                info!(user_id = %user.id(), session_issued, "user registered");
                Ok(RegisterUserResponse {
                    user_id: user.id(),
                    session_id,
                    session_issued,
                })
            }
            UserInsertOutcome::EmailTaken => {
                debug!("registration rejected: email already registered");
                Err(Error::unauthorized(USER_EXISTS_MESSAGE).with_details(
                    serde_json::json!({ "field": "email", "code": "email_taken" }),
                ))
            }
        }
    }
}

/// Session resolution service implementing [`SessionIdentity`].
#[derive(Clone)]
pub struct SessionIdentityService<R> {
    user_repo: Arc<R>,
}

impl<R> SessionIdentityService<R> {
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> SessionIdentity for SessionIdentityService<R>
where
    R: UserRepository,
{
    async fn resolve(&self, session_id: SessionId) -> Result<CallerIdentity, Error> {
        let user = self
            .user_repo
            .find_by_session(&session_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        Ok(CallerIdentity::new(session_id, user.id()))
    }
}
