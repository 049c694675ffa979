//! Meal data model.
//!
//! Meals belong to the user and session that created them. The `date` is
//! stored as epoch milliseconds so clients can round-trip the exact value.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{SessionId, UserId};

/// Validation errors returned by meal value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MealValidationError {
    #[error("meal date is outside the supported range")]
    DateOutOfRange,
}

/// Stable meal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealId(Uuid);

impl MealId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Meal name exactly as the client sent it.
///
/// Any string is accepted, including the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealName(String);

impl MealName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl AsRef<str> for MealName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<MealName> for String {
    fn from(value: MealName) -> Self {
        value.0
    }
}

impl From<String> for MealName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Point in time a meal was eaten, in epoch milliseconds.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use diet_backend::domain::MealDate;
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).single().expect("valid date");
/// assert_eq!(MealDate::from_datetime(at).epoch_millis(), 1_704_196_800_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealDate(i64);

impl MealDate {
    /// Build a date from epoch milliseconds, rejecting values chrono cannot
    /// represent.
    pub fn from_epoch_millis(millis: i64) -> Result<Self, MealValidationError> {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|_| Self(millis))
            .ok_or(MealValidationError::DateOutOfRange)
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }

    pub fn epoch_millis(self) -> i64 {
        self.0
    }
}

/// Fields a client supplies when creating or fully replacing a meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealContent {
    pub name: MealName,
    pub description: String,
    pub is_on_diet: bool,
    pub date: MealDate,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealPatch {
    pub name: Option<MealName>,
    pub description: Option<String>,
    pub is_on_diet: Option<bool>,
    pub date: Option<MealDate>,
}

impl MealPatch {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.is_on_diet.is_none()
            && self.date.is_none()
    }
}

/// Persisted meal record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meal {
    id: MealId,
    user_id: UserId,
    session_id: SessionId,
    content: MealContent,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Input for constructing a [`Meal`].
#[derive(Debug, Clone)]
pub struct MealDraft {
    pub id: MealId,
    pub user_id: UserId,
    pub session_id: SessionId,
    pub content: MealContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meal {
    pub fn new(draft: MealDraft) -> Self {
        let MealDraft {
            id,
            user_id,
            session_id,
            content,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            user_id,
            session_id,
            content,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> MealId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn name(&self) -> &MealName {
        &self.content.name
    }

    pub fn description(&self) -> &str {
        self.content.description.as_str()
    }

    pub fn is_on_diet(&self) -> bool {
        self.content.is_on_diet
    }

    pub fn date(&self) -> MealDate {
        self.content.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrite every client-editable field.
    pub fn replace(&mut self, content: MealContent, at: DateTime<Utc>) {
        self.content = content;
        self.updated_at = at;
    }

    /// Apply the supplied fields, leaving omitted ones untouched.
    pub fn apply(&mut self, patch: MealPatch, at: DateTime<Utc>) {
        let MealPatch {
            name,
            description,
            is_on_diet,
            date,
        } = patch;
        if let Some(name) = name {
            self.content.name = name;
        }
        if let Some(description) = description {
            self.content.description = description;
        }
        if let Some(is_on_diet) = is_on_diet {
            self.content.is_on_diet = is_on_diet;
        }
        if let Some(date) = date {
            self.content.date = date;
        }
        self.updated_at = at;
    }
}
