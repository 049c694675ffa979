//! Driving port for meal mutations.
//!
//! All operations act on meals owned by the supplied caller. Meals owned by
//! other sessions behave exactly like missing ones.

use async_trait::async_trait;

use crate::domain::{CallerIdentity, Error, Meal, MealContent, MealId, MealPatch};

/// Driving port for meal write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealCommand: Send + Sync {
    /// Record a new meal for the caller.
    async fn create_meal(&self, caller: CallerIdentity, content: MealContent)
    -> Result<Meal, Error>;

    /// Overwrite every editable field, returning the updated meal.
    ///
    /// Fails with `not_found` when the caller owns no such meal.
    async fn replace_meal(
        &self,
        caller: CallerIdentity,
        id: MealId,
        content: MealContent,
    ) -> Result<Meal, Error>;

    /// Update the supplied fields only, returning the updated meal.
    ///
    /// Fails with `not_found` when the caller owns no such meal.
    async fn patch_meal(
        &self,
        caller: CallerIdentity,
        id: MealId,
        patch: MealPatch,
    ) -> Result<Meal, Error>;

    /// Delete an owned meal. Deleting a missing meal succeeds.
    async fn delete_meal(&self, caller: CallerIdentity, id: MealId) -> Result<(), Error>;
}
