//! Parsers for individual session environment variables.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean variable and the value debug builds fall back to.
pub(super) struct BoolVar {
    name: &'static str,
    debug_default: bool,
}

impl BoolVar {
    pub(super) const fn new(name: &'static str, debug_default: bool) -> Self {
        Self {
            name,
            debug_default,
        }
    }
}

/// In debug builds run `warn` and return `fallback`; in release builds fail.
pub(super) fn fallback_or_error<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn: impl FnOnce(),
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn parse_bool_var<E: Env>(
    env: &E,
    mode: BuildMode,
    var: BoolVar,
) -> Result<bool, SessionConfigError> {
    let BoolVar {
        name,
        debug_default,
    } = var;
    let Some(value) = env.string(name) else {
        return fallback_or_error(
            mode,
            debug_default,
            SessionConfigError::MissingEnv { name },
            || warn!(variable = name, default = debug_default, "session setting not set"),
        );
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => fallback_or_error(
            mode,
            debug_default,
            SessionConfigError::InvalidEnv {
                name,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            },
            || warn!(variable = name, value = %value, default = debug_default, "invalid session setting"),
        ),
    }
}

pub(super) fn parse_same_site(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => fallback_or_error(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it"),
        ),
        _ => fallback_or_error(
            mode,
            SameSite::Lax,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            },
            || warn!(value = %value, "invalid SESSION_SAMESITE; using Lax"),
        ),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
