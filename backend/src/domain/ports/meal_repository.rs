//! Port for meal persistence.
//!
//! Every lookup and mutation is scoped by the owning session. Adapters must
//! express each scoped mutation as one conditional statement so there is no
//! window between the ownership check and the write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Meal, MealContent, MealId, MealPatch, SessionId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by meal repository adapters.
    pub enum MealRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "meal repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "meal repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Persist a new meal.
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError>;

    /// Meals created under `session_id`.
    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Meal>, MealRepositoryError>;

    /// Find a meal by id if it belongs to `session_id`.
    async fn find_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
    ) -> Result<Option<Meal>, MealRepositoryError>;

    /// Overwrite the editable fields of an owned meal.
    ///
    /// Returns the updated record, or `None` when no owned meal matched.
    async fn replace_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
        content: &MealContent,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Meal>, MealRepositoryError>;

    /// Apply a partial update to an owned meal.
    ///
    /// Returns the updated record, or `None` when no owned meal matched.
    async fn patch_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
        patch: &MealPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Meal>, MealRepositoryError>;

    /// Delete an owned meal, returning whether a row was removed.
    async fn delete_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
    ) -> Result<bool, MealRepositoryError>;

    /// On-diet flags of every meal created by `user_id`, newest date first.
    ///
    /// Meals sharing a date are ordered by most recent creation first.
    async fn diet_flags_newest_first(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<bool>, MealRepositoryError>;
}
