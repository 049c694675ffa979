//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod meals;
mod meals_dto;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every REST route plus the JSON and path extractor error handlers.
///
/// Session middleware and the shared [`state::HttpState`] / [`health::HealthState`]
/// are supplied by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(health::ready)
        .service(health::live)
        .service(users::register_user);
    meals::configure(cfg);
}
