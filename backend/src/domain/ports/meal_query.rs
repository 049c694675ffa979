//! Driving port for meal reads and metrics.

use async_trait::async_trait;

use crate::domain::{CallerIdentity, Error, Meal, MealId, MealMetrics};

/// Driving port for meal read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealQuery: Send + Sync {
    /// Meals recorded under the caller's session.
    async fn list_meals(&self, caller: CallerIdentity) -> Result<Vec<Meal>, Error>;

    /// One meal owned by the caller, or `not_found`.
    async fn get_meal(&self, caller: CallerIdentity, id: MealId) -> Result<Meal, Error>;

    /// Totals and best on-diet streak over the caller's meals.
    async fn metrics(&self, caller: CallerIdentity) -> Result<MealMetrics, Error>;
}
