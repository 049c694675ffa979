//! Meal API handlers.
//!
//! ```text
//! GET    /meals
//! POST   /meals            {"name":"Porridge","description":"Oats","is_on_diet":true,"date":"2024-06-01T08:00:00Z"}
//! GET    /meals/metrics
//! GET    /meals/{meal_id}
//! PUT    /meals/{meal_id}
//! PATCH  /meals/{meal_id}  {"is_on_diet":false}
//! DELETE /meals/{meal_id}
//! ```
//!
//! Every handler takes an [`AuthenticatedCaller`], so requests without a
//! session cookie are rejected before the body is read.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};

use crate::domain::{MealContent, MealPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::AuthenticatedCaller;
use crate::inbound::http::state::HttpState;

pub use super::meals_dto::{
    MealListResponse, MealMetricsResponse, MealPatchRequest, MealRequest, MealResponse,
    MessageResponse,
};
use super::meals_dto::MealPath;

/// Message returned after a successful partial update.
pub const MEAL_UPDATED_MESSAGE: &str = "Meal updated successfully";

/// List meals recorded under the caller's session.
#[utoipa::path(
    get,
    path = "/meals",
    responses(
        (status = 200, description = "Meals for the current session", body = MealListResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "listMeals"
)]
#[get("/meals")]
pub async fn list_meals(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<MealListResponse>> {
    let meals = state.meals_query.list_meals(caller.into_inner()).await?;
    Ok(web::Json(MealListResponse {
        meals: meals.into_iter().map(MealResponse::from).collect(),
    }))
}

/// Record a meal for the caller.
#[utoipa::path(
    post,
    path = "/meals",
    request_body = MealRequest,
    responses(
        (status = 201, description = "Meal created"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "createMeal"
)]
#[post("/meals")]
pub async fn create_meal(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    payload: web::Json<MealRequest>,
) -> ApiResult<HttpResponse> {
    let content = MealContent::try_from(payload.into_inner())?;
    state.meals.create_meal(caller.into_inner(), content).await?;
    Ok(HttpResponse::Created().finish())
}

/// Totals and best on-diet streak over the caller's meals.
#[utoipa::path(
    get,
    path = "/meals/metrics",
    responses(
        (status = 200, description = "Meal metrics", body = MealMetricsResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "mealMetrics"
)]
#[get("/meals/metrics")]
pub async fn meal_metrics(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<MealMetricsResponse>> {
    let metrics = state.meals_query.metrics(caller.into_inner()).await?;
    Ok(web::Json(metrics.into()))
}

/// Fetch one meal owned by the caller.
#[utoipa::path(
    get,
    path = "/meals/{meal_id}",
    params(("meal_id" = String, Path, description = "Meal identifier (UUID)")),
    responses(
        (status = 200, description = "Meal", body = MealResponse),
        (status = 400, description = "Invalid meal id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Meal not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "getMeal"
)]
#[get("/meals/{meal_id}")]
pub async fn get_meal(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<MealPath>,
) -> ApiResult<web::Json<MealResponse>> {
    let id = path.parse()?;
    let meal = state.meals_query.get_meal(caller.into_inner(), id).await?;
    Ok(web::Json(meal.into()))
}

/// Replace every editable field of a meal and return the updated record.
#[utoipa::path(
    put,
    path = "/meals/{meal_id}",
    params(("meal_id" = String, Path, description = "Meal identifier (UUID)")),
    request_body = MealRequest,
    responses(
        (status = 200, description = "Updated meal", body = MealResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Meal not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "replaceMeal"
)]
#[put("/meals/{meal_id}")]
pub async fn replace_meal(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<MealPath>,
    payload: web::Json<MealRequest>,
) -> ApiResult<web::Json<MealResponse>> {
    let id = path.parse()?;
    let content = MealContent::try_from(payload.into_inner())?;
    let meal = state
        .meals
        .replace_meal(caller.into_inner(), id, content)
        .await?;
    Ok(web::Json(meal.into()))
}

/// Update the supplied fields of a meal.
#[utoipa::path(
    patch,
    path = "/meals/{meal_id}",
    params(("meal_id" = String, Path, description = "Meal identifier (UUID)")),
    request_body = MealPatchRequest,
    responses(
        (status = 200, description = "Meal updated", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Meal not found", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "patchMeal"
)]
#[patch("/meals/{meal_id}")]
pub async fn patch_meal(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<MealPath>,
    payload: web::Json<MealPatchRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = path.parse()?;
    let patch = MealPatch::try_from(payload.into_inner())?;
    state
        .meals
        .patch_meal(caller.into_inner(), id, patch)
        .await?;
    Ok(web::Json(MessageResponse {
        message: MEAL_UPDATED_MESSAGE.to_owned(),
    }))
}

/// Delete a meal owned by the caller.
///
/// Succeeds with `204` whether or not the meal existed.
#[utoipa::path(
    delete,
    path = "/meals/{meal_id}",
    params(("meal_id" = String, Path, description = "Meal identifier (UUID)")),
    responses(
        (status = 204, description = "Meal deleted"),
        (status = 400, description = "Invalid meal id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["meals"],
    operation_id = "deleteMeal"
)]
#[delete("/meals/{meal_id}")]
pub async fn delete_meal(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<MealPath>,
) -> ApiResult<HttpResponse> {
    let id = path.parse()?;
    state.meals.delete_meal(caller.into_inner(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register every meal route on a service config.
///
/// `/meals/metrics` is registered ahead of `/meals/{meal_id}` so the literal
/// segment wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_meals)
        .service(create_meal)
        .service(meal_metrics)
        .service(get_meal)
        .service(replace_meal)
        .service(patch_meal)
        .service(delete_meal);
}

#[cfg(test)]
#[path = "meals_tests.rs"]
mod tests;
