//! Wiring of Diesel repositories into domain services and HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use diet_backend::domain::{
    MealCommandService, MealQueryService, SessionIdentityService, UserRegistrationService,
};
use diet_backend::inbound::http::state::HttpState;
use diet_backend::outbound::persistence::{DbPool, DieselMealRepository, DieselUserRepository};

/// Build the HTTP state backed by PostgreSQL repositories.
pub fn build_http_state(pool: &DbPool) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let meals = Arc::new(DieselMealRepository::new(pool.clone()));

    HttpState::new(
        Arc::new(UserRegistrationService::new(users.clone(), clock.clone())),
        Arc::new(SessionIdentityService::new(users)),
        Arc::new(MealCommandService::new(meals.clone(), clock)),
        Arc::new(MealQueryService::new(meals)),
    )
}
