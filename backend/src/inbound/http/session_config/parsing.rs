//! Environment parsing helpers for session configuration.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean toggle and the value debug builds fall back to.
pub(super) struct BoolToggle {
    name: &'static str,
    fallback: bool,
}

impl BoolToggle {
    pub(super) const fn new(name: &'static str, fallback: bool) -> Self {
        Self { name, fallback }
    }

    fn fallback_label(&self) -> &'static str {
        if self.fallback { "enabled" } else { "disabled" }
    }
}

/// Return `fallback` (after `warn_fn`) in debug builds, `error` otherwise.
pub(super) fn lenient_or<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: impl FnOnce(),
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn read_bool<E: Env>(
    env: &E,
    mode: BuildMode,
    toggle: BoolToggle,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(toggle.name) else {
        return lenient_or(
            mode,
            toggle.fallback,
            SessionConfigError::MissingEnv { name: toggle.name },
            || warn!("{} not set; defaulting to {}", toggle.name, toggle.fallback_label()),
        );
    };
    if let Some(flag) = parse_bool(&value) {
        return Ok(flag);
    }
    lenient_or(
        mode,
        toggle.fallback,
        SessionConfigError::InvalidEnv {
            name: toggle.name,
            value: value.clone(),
            expected: BOOL_EXPECTED,
        },
        || {
            warn!(
                value = %value,
                "invalid {}; defaulting to {}",
                toggle.name,
                toggle.fallback_label()
            );
        },
    )
}

pub(super) fn parse_same_site(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
    fallback: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => lenient_or(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it"),
        ),
        _ => lenient_or(
            mode,
            fallback,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            },
            || warn!(value = %value, "invalid SESSION_SAMESITE, using default"),
        ),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
