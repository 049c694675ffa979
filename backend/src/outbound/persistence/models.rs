//! Internal Diesel row models.
//!
//! These types never leave the persistence module; repositories convert them
//! to and from domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{meals, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = meals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MealRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub description: String,
    pub is_on_diet: bool,
    pub date: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = meals)]
pub(crate) struct NewMealRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub is_on_diet: bool,
    pub date: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for a meal update.
///
/// `None` fields are left out of the `SET` clause, so a full replacement
/// populates every field and a patch only the supplied ones.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = meals)]
pub(crate) struct MealChangeset<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub is_on_diet: Option<bool>,
    pub date: Option<i64>,
    pub updated_at: DateTime<Utc>,
}
