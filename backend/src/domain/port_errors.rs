//! Translation of driven-port failures into domain errors.
//!
//! Connection failures become `503` so clients may retry; query failures are
//! internal and get redacted at the edge.

use serde_json::json;

use super::Error;
use super::ports::{
    CatalogRepositoryError, RecipeRepositoryError, RelationRepositoryError,
    SubscriptionRepositoryError, UserPersistenceError,
};

impl From<UserPersistenceError> for Error {
    fn from(error: UserPersistenceError) -> Self {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }
}

impl From<CatalogRepositoryError> for Error {
    fn from(error: CatalogRepositoryError) -> Self {
        match error {
            CatalogRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("catalog repository unavailable: {message}"))
            }
            CatalogRepositoryError::Query { message } => {
                Error::internal(format!("catalog repository error: {message}"))
            }
            CatalogRepositoryError::Duplicate { field } => {
                Error::conflict(format!("{field} is already in use")).with_details(json!({
                    "field": field,
                    "code": "duplicate",
                }))
            }
        }
    }
}

impl From<RecipeRepositoryError> for Error {
    fn from(error: RecipeRepositoryError) -> Self {
        match error {
            RecipeRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("recipe repository unavailable: {message}"))
            }
            RecipeRepositoryError::Query { message } => {
                Error::internal(format!("recipe repository error: {message}"))
            }
            RecipeRepositoryError::MissingReference { message } => {
                Error::invalid_request("recipe references an unknown tag or ingredient")
                    .with_details(json!({ "code": "unknown_reference", "reason": message }))
            }
        }
    }
}

impl From<RelationRepositoryError> for Error {
    fn from(error: RelationRepositoryError) -> Self {
        match error {
            RelationRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("relation repository unavailable: {message}"))
            }
            RelationRepositoryError::Query { message } => {
                Error::internal(format!("relation repository error: {message}"))
            }
        }
    }
}

impl From<SubscriptionRepositoryError> for Error {
    fn from(error: SubscriptionRepositoryError) -> Self {
        match error {
            SubscriptionRepositoryError::Connection { message } => Error::service_unavailable(
                format!("subscription repository unavailable: {message}"),
            ),
            SubscriptionRepositoryError::Query { message } => {
                Error::internal(format!("subscription repository error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserPersistenceError::connection("down").into(), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("bad sql").into(), ErrorCode::InternalError)]
    #[case(CatalogRepositoryError::duplicate("slug").into(), ErrorCode::Conflict)]
    #[case(RecipeRepositoryError::missing_reference("fk").into(), ErrorCode::InvalidRequest)]
    #[case(RelationRepositoryError::connection("down").into(), ErrorCode::ServiceUnavailable)]
    #[case(SubscriptionRepositoryError::query("oops").into(), ErrorCode::InternalError)]
    fn maps_port_errors(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn duplicate_names_the_field() {
        let error: Error = CatalogRepositoryError::duplicate("color").into();
        assert_eq!(
            error.details(),
            Some(&json!({"field": "color", "code": "duplicate"}))
        );
    }
}
