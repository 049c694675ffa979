//! PostgreSQL persistence adapters using Diesel.
//!
//! Row structs (`models`) and table definitions (`schema`) stay private to
//! this module; repositories translate them to domain types and map driver
//! failures to the port error enums.
//!
//! ```ignore
//! use diet_backend::outbound::persistence::{DbPool, DieselMealRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/diet")).await?;
//! let meals = DieselMealRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_meal_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_meal_repository::DieselMealRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
