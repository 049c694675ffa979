//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! [`SessionContext`] wraps the Actix session so handlers only read or write
//! a typed [`SessionId`]. [`AuthenticatedCaller`] is the gate for meal
//! endpoints: it rejects requests without a session before any port is
//! called, then resolves the session into a [`CallerIdentity`].

use std::ops::Deref;

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{CallerIdentity, Error, SessionId};
use crate::inbound::http::state::HttpState;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session_id";

pub(crate) const SESSION_ID_KEY: &str = "session_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the session identifier in the session cookie.
    pub fn persist_session_id(&self, session_id: SessionId) -> Result<(), Error> {
        self.0
            .insert(SESSION_ID_KEY, session_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the session identifier, if the cookie carries a valid one.
    ///
    /// Values that do not parse are treated as absent.
    pub fn session_id(&self) -> Result<Option<SessionId>, Error> {
        let raw = self
            .0
            .get::<String>(SESSION_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match raw {
            Some(raw) => match raw.parse::<SessionId>() {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    warn!("invalid session id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require a session identifier or return `401 Unauthorized`.
    pub fn require_session_id(&self) -> Result<SessionId, Error> {
        self.session_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// Extractor yielding the resolved caller for gated endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedCaller(CallerIdentity);

impl AuthenticatedCaller {
    pub fn into_inner(self) -> CallerIdentity {
        self.0
    }
}

impl Deref for AuthenticatedCaller {
    type Target = CallerIdentity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedCaller {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session_id = SessionContext::new(session.await?).require_session_id()?;
            let state = state
                .ok_or_else(|| Error::internal("HTTP state is not configured for this route"))?;
            let caller = state.identity.resolve(session_id).await?;
            Ok(Self(caller))
        })
    }
}
