//! Meal DTOs and parsing helpers.
//!
//! Meal records are serialised with their stored column names
//! (`is_on_diet`, `user_id`, ...); metrics use camelCase keys.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Meal, MealContent, MealId, MealMetrics, MealName, MealPatch};
use crate::inbound::http::validation::{
    DateInput, FieldName, parse_meal_date, parse_uuid, require,
};

const MEAL_ID: FieldName = FieldName::new("mealId");
const NAME: FieldName = FieldName::new("name");
const DESCRIPTION: FieldName = FieldName::new("description");
const IS_ON_DIET: FieldName = FieldName::new("is_on_diet");
const DATE: FieldName = FieldName::new("date");

#[derive(Debug, Deserialize)]
pub(super) struct MealPath {
    pub(super) meal_id: String,
}

impl MealPath {
    pub(super) fn parse(&self) -> Result<MealId, Error> {
        parse_uuid(&self.meal_id, MEAL_ID).map(MealId::from_uuid)
    }
}

/// Request payload for creating or fully replacing a meal.
///
/// Every field is required.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct MealRequest {
    #[schema(example = "Porridge")]
    pub name: Option<String>,
    #[schema(example = "Oats with berries")]
    pub description: Option<String>,
    pub is_on_diet: Option<bool>,
    pub date: Option<DateInput>,
}

impl TryFrom<MealRequest> for MealContent {
    type Error = Error;

    fn try_from(value: MealRequest) -> Result<Self, Self::Error> {
        let MealRequest {
            name,
            description,
            is_on_diet,
            date,
        } = value;
        Ok(Self {
            name: MealName::from(require(name, NAME)?),
            description: require(description, DESCRIPTION)?,
            is_on_diet: require(is_on_diet, IS_ON_DIET)?,
            date: parse_meal_date(require(date, DATE)?, DATE)?,
        })
    }
}

/// Request payload for a partial meal update.
///
/// Omitted (or `null`) fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct MealPatchRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_on_diet: Option<bool>,
    pub date: Option<DateInput>,
}

impl TryFrom<MealPatchRequest> for MealPatch {
    type Error = Error;

    fn try_from(value: MealPatchRequest) -> Result<Self, Self::Error> {
        let MealPatchRequest {
            name,
            description,
            is_on_diet,
            date,
        } = value;
        Ok(Self {
            name: name.map(MealName::from),
            description,
            is_on_diet,
            date: date.map(|raw| parse_meal_date(raw, DATE)).transpose()?,
        })
    }
}

/// Response payload for a stored meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    pub name: String,
    pub description: String,
    pub is_on_diet: bool,
    /// Epoch milliseconds.
    #[schema(example = 1_717_245_000_000_i64)]
    pub date: i64,
    #[schema(example = "2024-06-01T12:31:04+00:00")]
    pub created_at: String,
    pub updated_at: String,
}

impl From<Meal> for MealResponse {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id().to_string(),
            user_id: meal.user_id().to_string(),
            session_id: meal.session_id().to_string(),
            name: meal.name().as_ref().to_owned(),
            description: meal.description().to_owned(),
            is_on_diet: meal.is_on_diet(),
            date: meal.date().epoch_millis(),
            created_at: meal.created_at().to_rfc3339(),
            updated_at: meal.updated_at().to_rfc3339(),
        }
    }
}

/// Response payload listing the caller's meals.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MealListResponse {
    pub meals: Vec<MealResponse>,
}

/// Response payload for meal metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealMetricsResponse {
    pub total_meals: u64,
    pub total_meals_on_diet: u64,
    pub total_meals_off_diet: u64,
    pub best_on_diet_sequence: u64,
}

impl From<MealMetrics> for MealMetricsResponse {
    fn from(metrics: MealMetrics) -> Self {
        Self {
            total_meals: metrics.total_meals,
            total_meals_on_diet: metrics.total_meals_on_diet,
            total_meals_off_diet: metrics.total_meals_off_diet,
            best_on_diet_sequence: metrics.best_on_diet_sequence,
        }
    }
}

/// Acknowledgement message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Meal updated successfully")]
    pub message: String,
}
