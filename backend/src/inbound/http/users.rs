//! User registration handler.
//!
//! ```text
//! POST /user {"name":"Ada","email":"ada@example.com"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RegisterUserRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_email, parse_user_name, require};

const NAME: FieldName = FieldName::new("name");
const EMAIL: FieldName = FieldName::new("email");

/// Registration request body for `POST /user`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterUserBody {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

/// Register a user under the caller's session.
///
/// A session cookie is issued when the request carries none. Duplicate
/// e-mail addresses are rejected with `401` and leave the cookie untouched.
#[utoipa::path(
    post,
    path = "/user",
    request_body = RegisterUserBody,
    responses(
        (status = 201, description = "User registered", headers(("Set-Cookie" = String, description = "Session cookie, issued when absent"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "User already exists", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/user")]
pub async fn register_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    let RegisterUserBody { name, email } = payload.into_inner();
    let name = parse_user_name(require(name, NAME)?, NAME)?;
    let email = parse_email(require(email, EMAIL)?, EMAIL)?;

    let response = state
        .registration
        .register(RegisterUserRequest {
            session_id: session.session_id()?,
            name,
            email,
        })
        .await?;

    if response.session_issued {
        session.persist_session_id(response.session_id)?;
    }
    Ok(HttpResponse::Created().finish())
}
