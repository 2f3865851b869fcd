//! Translation of pool and Diesel failures into repository errors.
//!
//! Both repositories expose the same two-variant error shape, so the mapping
//! takes the repository's constructors and stays generic.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure with the repository's connection constructor.
pub(crate) fn map_pool_error_with<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => connection(message),
    }
}

/// Map a Diesel failure with the repository's query and connection
/// constructors.
///
/// Messages stay generic; driver detail is only logged.
pub(crate) fn map_diesel_error_with<E>(
    error: DieselError,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection lost".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("duplicate record identifier".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced record no longer exists".to_owned())
        }
        DieselError::DatabaseError(_, _) => query("database error".to_owned()),
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::DeserializationError(_) => query("row could not be decoded".to_owned()),
        DieselError::SerializationError(_) => query("value could not be encoded".to_owned()),
        _ => query("database query error".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_diesel_error_with(error, Mapped::Query, Mapped::Connection)
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert_eq!(map(error), Mapped::Connection("database connection lost".to_owned()));
    }

    #[rstest]
    fn unique_violation_is_a_query_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );
        assert_eq!(map(error), Mapped::Query("duplicate record identifier".to_owned()));
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(map(DieselError::NotFound), Mapped::Query("record not found".to_owned()));
    }

    #[rstest]
    #[case(PoolError::checkout("timed out"), "timed out")]
    #[case(PoolError::build("refused"), "refused")]
    fn pool_errors_are_connection_errors(#[case] error: PoolError, #[case] expected: &str) {
        assert_eq!(
            map_pool_error_with(error, Mapped::Connection),
            Mapped::Connection(expected.to_owned())
        );
    }
}
