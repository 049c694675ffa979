//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{MealCommand, MealQuery, SessionIdentity, UserRegistration};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn UserRegistration>,
    pub identity: Arc<dyn SessionIdentity>,
    pub meals: Arc<dyn MealCommand>,
    pub meals_query: Arc<dyn MealQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        registration: Arc<dyn UserRegistration>,
        identity: Arc<dyn SessionIdentity>,
        meals: Arc<dyn MealCommand>,
        meals_query: Arc<dyn MealQuery>,
    ) -> Self {
        Self {
            registration,
            identity,
            meals,
            meals_query,
        }
    }
}
