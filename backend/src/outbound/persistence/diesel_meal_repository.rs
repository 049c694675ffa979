//! PostgreSQL-backed `MealRepository` using Diesel.
//!
//! Scoped mutations filter on both `id` and `session_id` inside the same
//! statement and use `RETURNING` to hand back the updated row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MealRepository, MealRepositoryError};
use crate::domain::{
    Meal, MealContent, MealDate, MealDraft, MealId, MealName, MealPatch, SessionId, UserId,
};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{MealChangeset, MealRow, NewMealRow};
use super::pool::DbPool;
use super::schema::meals;

/// Diesel implementation of the meal repository port.
#[derive(Clone)]
pub struct DieselMealRepository {
    pool: DbPool,
}

impl DieselMealRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> MealRepositoryError {
    map_diesel_error(
        error,
        MealRepositoryError::query,
        MealRepositoryError::connection,
    )
}

fn row_to_meal(row: MealRow) -> Result<Meal, MealRepositoryError> {
    let date = MealDate::from_epoch_millis(row.date)
        .map_err(|err| MealRepositoryError::query(format!("stored meal date invalid: {err}")))?;
    Ok(Meal::new(MealDraft {
        id: MealId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        session_id: SessionId::from_uuid(row.session_id),
        content: MealContent {
            name: MealName::from(row.name),
            description: row.description,
            is_on_diet: row.is_on_diet,
            date,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

impl DieselMealRepository {
    async fn update_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
        changes: MealChangeset<'_>,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, MealRepositoryError::connection))?;

        let row: Option<MealRow> = diesel::update(
            meals::table
                .filter(meals::id.eq(id.as_uuid()))
                .filter(meals::session_id.eq(session_id.as_uuid())),
        )
        .set(&changes)
        .returning(MealRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(diesel_error)?;

        row.map(row_to_meal).transpose()
    }
}

#[async_trait]
impl MealRepository for DieselMealRepository {
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, MealRepositoryError::connection))?;

        let row = NewMealRow {
            id: *meal.id().as_uuid(),
            user_id: *meal.user_id().as_uuid(),
            session_id: *meal.session_id().as_uuid(),
            name: meal.name().as_ref(),
            description: meal.description(),
            is_on_diet: meal.is_on_diet(),
            date: meal.date().epoch_millis(),
            created_at: meal.created_at(),
            updated_at: meal.updated_at(),
        };

        diesel::insert_into(meals::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Meal>, MealRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, MealRepositoryError::connection))?;

        let rows: Vec<MealRow> = meals::table
            .filter(meals::session_id.eq(session_id.as_uuid()))
            .order((meals::date.desc(), meals::created_at.desc()))
            .select(MealRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_meal).collect()
    }

    async fn find_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, MealRepositoryError::connection))?;

        let row: Option<MealRow> = meals::table
            .filter(meals::id.eq(id.as_uuid()))
            .filter(meals::session_id.eq(session_id.as_uuid()))
            .select(MealRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_meal).transpose()
    }

    async fn replace_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
        content: &MealContent,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        let changes = MealChangeset {
            name: Some(content.name.as_ref()),
            description: Some(content.description.as_str()),
            is_on_diet: Some(content.is_on_diet),
            date: Some(content.date.epoch_millis()),
            updated_at,
        };
        self.update_owned(id, session_id, changes).await
    }

    async fn patch_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
        patch: &MealPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        let changes = MealChangeset {
            name: patch.name.as_ref().map(AsRef::as_ref),
            description: patch.description.as_deref(),
            is_on_diet: patch.is_on_diet,
            date: patch.date.map(MealDate::epoch_millis),
            updated_at,
        };
        self.update_owned(id, session_id, changes).await
    }

    async fn delete_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
    ) -> Result<bool, MealRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, MealRepositoryError::connection))?;

        let removed = diesel::delete(
            meals::table
                .filter(meals::id.eq(id.as_uuid()))
                .filter(meals::session_id.eq(session_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(removed > 0)
    }

    async fn diet_flags_newest_first(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<bool>, MealRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, MealRepositoryError::connection))?;

        meals::table
            .filter(meals::user_id.eq(user_id.as_uuid()))
            .order((meals::date.desc(), meals::created_at.desc()))
            .select(meals::is_on_diet)
            .load::<bool>(&mut conn)
            .await
            .map_err(diesel_error)
    }
}
