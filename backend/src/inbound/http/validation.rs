//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper turns a malformed input into a `400 invalid_request` error
//! whose `details` name the offending field and a stable code.

use pagination::{PageRequest, PaginationError};
use serde_json::json;

use crate::domain::{
    CatalogValidationError, Error, LoginValidationError, RecipeValidationError, UserId,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidFlag,
    InvalidPage,
    InvalidLimit,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidFlag => "invalid_flag",
            Self::InvalidPage => "invalid_page",
            Self::InvalidLimit => "invalid_limit",
            Self::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn value_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse a user id from a path or query value.
pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| {
        value_error(
            field,
            ErrorCode::InvalidUuid,
            format!("{} must be a valid UUID", field.as_str()),
            value,
        )
    })
}

/// Parse a boolean query flag. Accepts `1`/`0` and `true`/`false`; an absent
/// flag is `false`.
pub(crate) fn parse_flag(value: Option<&str>, field: FieldName) -> Result<bool, Error> {
    match value {
        None | Some("0" | "false") => Ok(false),
        Some("1" | "true") => Ok(true),
        Some(other) => Err(value_error(
            field,
            ErrorCode::InvalidFlag,
            format!("{} must be 0 or 1", field.as_str()),
            other,
        )),
    }
}

/// Parse an optional non-negative integer query value.
pub(crate) fn parse_count(value: Option<&str>, field: FieldName) -> Result<Option<u32>, Error> {
    value
        .map(|raw| {
            raw.parse::<u32>().map_err(|_| {
                value_error(
                    field,
                    ErrorCode::InvalidValue,
                    format!("{} must be a non-negative integer", field.as_str()),
                    raw,
                )
            })
        })
        .transpose()
}

/// Validate `page` and `limit` query values.
pub(crate) fn page_request(page: Option<u32>, limit: Option<u32>) -> Result<PageRequest, Error> {
    PageRequest::from_query(page, limit).map_err(|err| match err {
        PaginationError::InvalidPage => {
            Error::invalid_field("page", ErrorCode::InvalidPage.as_str(), err.to_string())
        }
        PaginationError::InvalidLimit { .. } => {
            Error::invalid_field("limit", ErrorCode::InvalidLimit.as_str(), err.to_string())
        }
    })
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail => {
            Error::invalid_field("email", "invalid_email", err.to_string())
        }
        LoginValidationError::EmptyPassword => {
            Error::invalid_field("password", "empty_password", err.to_string())
        }
    }
}

pub(crate) fn map_catalog_validation_error(err: CatalogValidationError) -> Error {
    let code = match err {
        CatalogValidationError::Blank { .. } => "blank",
        CatalogValidationError::TooLong { .. } => "too_long",
        CatalogValidationError::InvalidColor => "invalid_color",
        CatalogValidationError::InvalidSlug => "invalid_slug",
    };
    Error::invalid_field(err.field(), code, err.to_string())
}

pub(crate) fn map_recipe_validation_error(err: RecipeValidationError) -> Error {
    let code = match &err {
        RecipeValidationError::Catalog(inner) => {
            return map_catalog_validation_error(inner.clone());
        }
        RecipeValidationError::CookingTimeTooShort | RecipeValidationError::AmountTooSmall => {
            "too_small"
        }
        RecipeValidationError::CookingTimeTooLong { .. }
        | RecipeValidationError::AmountTooLarge { .. } => "too_large",
        RecipeValidationError::NoIngredients => "empty",
        RecipeValidationError::DuplicateIngredient(_) | RecipeValidationError::DuplicateTag(_) => {
            "duplicate"
        }
        RecipeValidationError::Blank { .. } => "blank",
    };
    Error::invalid_field(err.field(), code, err.to_string())
}
