//! In-memory repository adapters.
//!
//! Each adapter holds its rows behind one mutex so conditional writes are
//! atomic, matching the single-statement guarantees of the Diesel adapters.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    MealRepository, MealRepositoryError, UserInsertOutcome, UserPersistenceError, UserRepository,
};
use crate::domain::{Meal, MealContent, MealId, MealPatch, SessionId, User, UserId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Users kept in registration order.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    unavailable: AtomicBool,
}

impl InMemoryUserRepository {
    /// Make every subsequent call fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), UserPersistenceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(UserPersistenceError::connection("store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert_if_email_available(
        &self,
        user: &User,
    ) -> Result<UserInsertOutcome, UserPersistenceError> {
        self.check_available()?;
        let mut users = lock(&self.users);
        if users.iter().any(|existing| existing.email() == user.email()) {
            return Ok(UserInsertOutcome::EmailTaken);
        }
        users.push(user.clone());
        Ok(UserInsertOutcome::Inserted)
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.check_available()?;
        Ok(lock(&self.users)
            .iter()
            .find(|user| user.session_id() == *session_id)
            .cloned())
    }
}

/// Meals kept in insertion order.
#[derive(Default)]
pub struct InMemoryMealRepository {
    meals: Mutex<Vec<Meal>>,
    unavailable: AtomicBool,
}

impl InMemoryMealRepository {
    /// Make every subsequent call fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        lock(&self.meals).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), MealRepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(MealRepositoryError::connection("store offline"));
        }
        Ok(())
    }

    fn update_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
        update: impl FnOnce(&mut Meal),
    ) -> Result<Option<Meal>, MealRepositoryError> {
        self.check_available()?;
        let mut meals = lock(&self.meals);
        Ok(meals
            .iter_mut()
            .find(|meal| meal.id() == *id && meal.session_id() == *session_id)
            .map(|meal| {
                update(meal);
                meal.clone()
            }))
    }
}

fn newest_first(meals: &mut [Meal]) {
    meals.sort_by(|a, b| {
        b.date()
            .epoch_millis()
            .cmp(&a.date().epoch_millis())
            .then_with(|| b.created_at().cmp(&a.created_at()))
    });
}

#[async_trait]
impl MealRepository for InMemoryMealRepository {
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError> {
        self.check_available()?;
        lock(&self.meals).push(meal.clone());
        Ok(())
    }

    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Meal>, MealRepositoryError> {
        self.check_available()?;
        let mut owned: Vec<Meal> = lock(&self.meals)
            .iter()
            .filter(|meal| meal.session_id() == *session_id)
            .cloned()
            .collect();
        newest_first(&mut owned);
        Ok(owned)
    }

    async fn find_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        self.check_available()?;
        Ok(lock(&self.meals)
            .iter()
            .find(|meal| meal.id() == *id && meal.session_id() == *session_id)
            .cloned())
    }

    async fn replace_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
        content: &MealContent,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        self.update_owned(id, session_id, |meal| {
            meal.replace(content.clone(), updated_at);
        })
    }

    async fn patch_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
        patch: &MealPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        self.update_owned(id, session_id, |meal| meal.apply(patch.clone(), updated_at))
    }

    async fn delete_owned(
        &self,
        id: &MealId,
        session_id: &SessionId,
    ) -> Result<bool, MealRepositoryError> {
        self.check_available()?;
        let mut meals = lock(&self.meals);
        let before = meals.len();
        meals.retain(|meal| !(meal.id() == *id && meal.session_id() == *session_id));
        Ok(meals.len() < before)
    }

    async fn diet_flags_newest_first(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<bool>, MealRepositoryError> {
        self.check_available()?;
        let mut owned: Vec<Meal> = lock(&self.meals)
            .iter()
            .filter(|meal| meal.user_id() == *user_id)
            .cloned()
            .collect();
        newest_first(&mut owned);
        Ok(owned.iter().map(Meal::is_on_diet).collect())
    }
}
