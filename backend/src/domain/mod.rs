//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed entities for users, sessions, and meals,
//! plus the services that implement the driving ports consumed by inbound
//! adapters. Nothing here depends on HTTP or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Meal, MealMetrics: aggregates and projections.
//! - CallerIdentity: the resolved session owner passed to meal operations.

pub mod error;
pub mod meal;
pub mod meal_service;
pub mod metrics;
pub mod ports;
pub mod session;
pub mod trace_id;
pub mod user;
pub mod user_registration_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::meal::{
    Meal, MealContent, MealDate, MealDraft, MealId, MealName, MealPatch,
    MealValidationError,
};
pub use self::meal_service::{MEAL_NOT_FOUND_MESSAGE, MealCommandService, MealQueryService};
pub use self::metrics::MealMetrics;
pub use self::session::{CallerIdentity, SessionId};
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, User, UserDraft, UserId, UserName, UserValidationError,
};
pub use self::user_registration_service::{
    SessionIdentityService, USER_EXISTS_MESSAGE, UserRegistrationService,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use diet_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("login required"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
