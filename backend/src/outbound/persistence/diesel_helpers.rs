//! Shared helpers for Diesel repository implementations.
//!
//! Every repository maps pool failures to its port's `connection` variant
//! and Diesel failures to `query`, except closed connections which are
//! `connection` as well. Unique violations are surfaced separately so
//! adapters can report duplicates without parsing messages.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(super) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel error variants into query/connection constructors.
///
/// Driver messages are logged at `debug` and replaced with fixed strings so
/// SQL details never reach API clients.
pub(super) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Name of the violated unique constraint, if `error` is a unique violation.
pub(super) fn unique_violation(error: &DieselError) -> Option<&str> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            Some(info.constraint_name().unwrap_or_default())
        }
        _ => None,
    }
}

/// Whether `error` is a foreign key violation.
pub(super) fn is_foreign_key_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

/// Convert a validated domain count to its `INTEGER` column value.
///
/// Domain counts are capped at `i32::MAX` on construction.
#[expect(
    clippy::cast_possible_wrap,
    reason = "domain values are validated to fit in i32"
)]
pub(super) fn count_for_db(value: u32) -> i32 {
    value as i32
}

/// Convert an `INTEGER` column value back to a domain count.
pub(super) fn count_from_db(value: i32, column: &str) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("{column}: negative value {value}"))
}

/// Convert a row count to the `u64` totals used by pagination.
pub(super) fn total_from_db(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub(super) fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}
