//! Test doubles shared by unit tests and the integration suites in `tests/`.
//!
//! Compiled for `cfg(test)` and the `test-support` feature only.

pub mod clock;
pub mod memory;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use mockable::Clock;

use crate::domain::{
    MealCommandService, MealQueryService, SessionIdentityService, UserRegistrationService,
};
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;

pub use clock::MutableClock;
pub use memory::{InMemoryMealRepository, InMemoryUserRepository};

/// In-memory repositories plus the HTTP state wired on top of them.
pub struct MemoryBackend {
    pub users: Arc<InMemoryUserRepository>,
    pub meals: Arc<InMemoryMealRepository>,
    pub clock: Arc<MutableClock>,
    pub state: HttpState,
}

impl MemoryBackend {
    /// Wire the real domain services onto fresh in-memory repositories.
    pub fn new(clock: MutableClock) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let meals = Arc::new(InMemoryMealRepository::default());
        let clock = Arc::new(clock);
        let shared_clock: Arc<dyn Clock> = clock.clone();

        let state = HttpState::new(
            Arc::new(UserRegistrationService::new(
                users.clone(),
                shared_clock.clone(),
            )),
            Arc::new(SessionIdentityService::new(users.clone())),
            Arc::new(MealCommandService::new(meals.clone(), shared_clock)),
            Arc::new(MealQueryService::new(meals.clone())),
        );

        Self {
            users,
            meals,
            clock,
            state,
        }
    }
}

/// Production session middleware with the `Secure` flag off so plain HTTP
/// test requests round-trip the cookie.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionSettings {
        key,
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
    .middleware()
}

/// Write `len` key bytes to a temporary file for session configuration tests.
///
/// # Errors
///
/// Returns any I/O error raised while creating or writing the file.
pub fn session_key_file(len: usize) -> std::io::Result<tempfile::NamedTempFile> {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(&vec![b's'; len])?;
    file.flush()?;
    Ok(file)
}
