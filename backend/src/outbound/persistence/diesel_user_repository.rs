//! PostgreSQL-backed `UserRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserInsertOutcome, UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, SessionId, User, UserDraft, UserId, UserName};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let name = UserName::new(row.name)
        .map_err(|err| UserPersistenceError::query(format!("stored user name invalid: {err}")))?;
    let email = EmailAddress::new(row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email invalid: {err}")))?;
    Ok(User::new(UserDraft {
        id: UserId::from_uuid(row.id),
        session_id: SessionId::from_uuid(row.session_id),
        name,
        email,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert_if_email_available(
        &self,
        user: &User,
    ) -> Result<UserInsertOutcome, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            session_id: *user.session_id().as_uuid(),
            name: user.name().as_ref(),
            email: user.email().as_ref(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        };

        let inserted = diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::email)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(if inserted == 0 {
            UserInsertOutcome::EmailTaken
        } else {
            UserInsertOutcome::Inserted
        })
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row: Option<UserRow> = users::table
            .filter(users::session_id.eq(session_id.as_uuid()))
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_user).transpose()
    }
}
