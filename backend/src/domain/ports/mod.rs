//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod meal_command;
mod meal_query;
mod meal_repository;
mod session_identity;
mod user_registration;
mod user_repository;

pub use meal_command::MealCommand;
#[cfg(test)]
pub use meal_command::MockMealCommand;
pub use meal_query::MealQuery;
#[cfg(test)]
pub use meal_query::MockMealQuery;
#[cfg(test)]
pub use meal_repository::MockMealRepository;
pub use meal_repository::{MealRepository, MealRepositoryError};
#[cfg(test)]
pub use session_identity::MockSessionIdentity;
pub use session_identity::SessionIdentity;
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::{RegisterUserRequest, RegisterUserResponse, UserRegistration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserInsertOutcome, UserPersistenceError, UserRepository};
