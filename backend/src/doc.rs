//! OpenAPI documentation.
//!
//! [`ApiDoc`] registers every REST path, the error envelope schemas, and the
//! `session_id` cookie security scheme. Swagger UI serves it in debug builds
//! and `cargo run --bin openapi-dump` prints it.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::meals::{
    MealListResponse, MealMetricsResponse, MealPatchRequest, MealRequest, MealResponse,
    MessageResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::session::SESSION_COOKIE_NAME;
use crate::inbound::http::users::RegisterUserBody;
use crate::inbound::http::validation::DateInput;

/// Name of the cookie security scheme in the document.
pub const SESSION_SECURITY_SCHEME: &str = "SessionCookie";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            SESSION_SECURITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /user.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Daily diet API",
        description = "Session-scoped meal tracking with on-diet metrics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::meals::list_meals,
        crate::inbound::http::meals::create_meal,
        crate::inbound::http::meals::meal_metrics,
        crate::inbound::http::meals::get_meal,
        crate::inbound::http::meals::replace_meal,
        crate::inbound::http::meals::patch_meal,
        crate::inbound::http::meals::delete_meal,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterUserBody,
        MealRequest,
        MealPatchRequest,
        MealResponse,
        MealListResponse,
        MealMetricsResponse,
        MessageResponse,
        DateInput,
    )),
    tags(
        (name = "users", description = "Registration"),
        (name = "meals", description = "Meal records and metrics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
