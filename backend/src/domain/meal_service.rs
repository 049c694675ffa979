//! Meal domain services.
//!
//! These services implement the meal driving ports. Ownership is enforced by
//! passing the caller's session to every repository call; a meal owned by
//! another session is reported as missing.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{MealCommand, MealQuery, MealRepository, MealRepositoryError};
use crate::domain::{
    CallerIdentity, Error, Meal, MealContent, MealDraft, MealId, MealMetrics, MealPatch,
};

/// Message returned when a meal lookup misses.
pub const MEAL_NOT_FOUND_MESSAGE: &str = "Meal not found";

fn map_repository_error(error: MealRepositoryError) -> Error {
    match error {
        MealRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("meal repository unavailable: {message}"))
        }
        MealRepositoryError::Query { message } => {
            Error::internal(format!("meal repository error: {message}"))
        }
    }
}

fn meal_not_found(id: MealId) -> Error {
    Error::not_found(MEAL_NOT_FOUND_MESSAGE).with_details(serde_json::json!({ "id": id }))
}

/// Meal service implementing the command driving port.
#[derive(Clone)]
pub struct MealCommandService<R> {
    meal_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> MealCommandService<R> {
    pub fn new(meal_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { meal_repo, clock }
    }
}

#[async_trait]
impl<R> MealCommand for MealCommandService<R>
where
    R: MealRepository,
{
    async fn create_meal(
        &self,
        caller: CallerIdentity,
        content: MealContent,
    ) -> Result<Meal, Error> {
        let now = self.clock.utc();
        let meal = Meal::new(MealDraft {
            id: MealId::random(),
            user_id: caller.user_id(),
            session_id: caller.session_id(),
            content,
            created_at: now,
            updated_at: now,
        });
        self.meal_repo
            .insert(&meal)
            .await
            .map_err(map_repository_error)?;
        debug!(meal_id = %meal.id(), user_id = %caller.user_id(), "meal created");
        Ok(meal)
    }

    async fn replace_meal(
        &self,
        caller: CallerIdentity,
        id: MealId,
        content: MealContent,
    ) -> Result<Meal, Error> {
        self.meal_repo
            .replace_owned(&id, &caller.session_id(), &content, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| meal_not_found(id))
    }

    async fn patch_meal(
        &self,
        caller: CallerIdentity,
        id: MealId,
        patch: MealPatch,
    ) -> Result<Meal, Error> {
        self.meal_repo
            .patch_owned(&id, &caller.session_id(), &patch, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| meal_not_found(id))
    }

    async fn delete_meal(&self, caller: CallerIdentity, id: MealId) -> Result<(), Error> {
        let removed = self
            .meal_repo
            .delete_owned(&id, &caller.session_id())
            .await
            .map_err(map_repository_error)?;
        debug!(meal_id = %id, removed, "meal delete processed");
        Ok(())
    }
}

/// Meal service implementing the query driving port.
#[derive(Clone)]
pub struct MealQueryService<R> {
    meal_repo: Arc<R>,
}

impl<R> MealQueryService<R> {
    pub fn new(meal_repo: Arc<R>) -> Self {
        Self { meal_repo }
    }
}

#[async_trait]
impl<R> MealQuery for MealQueryService<R>
where
    R: MealRepository,
{
    async fn list_meals(&self, caller: CallerIdentity) -> Result<Vec<Meal>, Error> {
        self.meal_repo
            .list_for_session(&caller.session_id())
            .await
            .map_err(map_repository_error)
    }

    async fn get_meal(&self, caller: CallerIdentity, id: MealId) -> Result<Meal, Error> {
        self.meal_repo
            .find_owned(&id, &caller.session_id())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| meal_not_found(id))
    }

    async fn metrics(&self, caller: CallerIdentity) -> Result<MealMetrics, Error> {
        let flags = self
            .meal_repo
            .diet_flags_newest_first(&caller.user_id())
            .await
            .map_err(map_repository_error)?;
        Ok(MealMetrics::from_newest_first(flags))
    }
}

#[cfg(test)]
#[path = "meal_service_tests.rs"]
mod tests;
