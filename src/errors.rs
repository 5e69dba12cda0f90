use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::pooled_connection::deadpool::PoolError;
use thiserror::Error;

/// Errors raised by the store and its repositories.
///
/// Reads that find nothing are not errors, they return `None`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected a write (unique, foreign key, not-null or check violation).
    #[error("constraint violation{}: {message}", on_constraint(.constraint))]
    Constraint {
        constraint: Option<String>,
        message: String,
    },

    /// The store could not be reached or the connection was lost.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Strict delete of an identifier that has no row.
    #[error("no record with id {id}")]
    NotFound { id: String },

    #[error("query failed: {0}")]
    Query(String),

    #[error("migration failed: {0}")]
    Migration(String),
}

// diesel-async reports a lost backend either as `UnableToSendCommand` or, when the
// server terminates the session (SQLSTATE 57P01/57P02), as `Unknown` with the server's
// message; the SQLSTATE itself is not exposed.
const CONNECTION_LOST_MESSAGES: &[&str] = &[
    "terminating connection",
    "connection closed",
    "server closed the connection",
    "connection to server was lost",
];

fn is_connection_lost(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    CONNECTION_LOST_MESSAGES
        .iter()
        .any(|pattern| message.contains(pattern))
}

fn on_constraint(constraint: &Option<String>) -> String {
    constraint
        .as_deref()
        .map(|name| format!(" on {name}"))
        .unwrap_or_default()
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation => StoreError::Constraint {
                    constraint: info.constraint_name().map(str::to_owned),
                    message: info.message().to_owned(),
                },
                DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand => {
                    StoreError::Unavailable(info.message().to_owned())
                }
                _ if is_connection_lost(info.message()) => {
                    StoreError::Unavailable(info.message().to_owned())
                }
                _ => StoreError::Query(info.message().to_owned()),
            },
            other => StoreError::Query(other.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for StoreError {
    fn from(err: diesel::ConnectionError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<PoolError> for StoreError {
    fn from(err: PoolError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("environment variable {var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn db_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_string()))
    }

    #[rstest]
    #[case(DatabaseErrorKind::UniqueViolation)]
    #[case(DatabaseErrorKind::ForeignKeyViolation)]
    #[case(DatabaseErrorKind::NotNullViolation)]
    #[case(DatabaseErrorKind::CheckViolation)]
    fn test_constraint_kinds_map_to_constraint(#[case] kind: DatabaseErrorKind) {
        let err = StoreError::from(db_error(kind, "violates constraint"));
        match err {
            StoreError::Constraint { message, .. } => assert_eq!(message, "violates constraint"),
            other => panic!("expected constraint error, got {other:?}"),
        }
    }

    #[rstest]
    #[case(DatabaseErrorKind::ClosedConnection, "gone")]
    #[case(DatabaseErrorKind::UnableToSendCommand, "connection closed")]
    #[case(
        DatabaseErrorKind::Unknown,
        "terminating connection due to administrator command"
    )]
    #[case(
        DatabaseErrorKind::Unknown,
        "server closed the connection unexpectedly"
    )]
    fn test_lost_connection_maps_to_unavailable(
        #[case] kind: DatabaseErrorKind,
        #[case] message: &str,
    ) {
        let err = StoreError::from(db_error(kind, message));
        assert!(matches!(err, StoreError::Unavailable(msg) if msg == message));
    }

    #[rstest]
    fn test_other_errors_map_to_query() {
        let err = StoreError::from(DieselError::NotFound);
        assert!(matches!(err, StoreError::Query(_)));

        let err = StoreError::from(db_error(DatabaseErrorKind::SerializationFailure, "retry"));
        assert!(matches!(err, StoreError::Query(msg) if msg == "retry"));

        let err = StoreError::from(db_error(
            DatabaseErrorKind::Unknown,
            "relation \"persons\" does not exist",
        ));
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[rstest]
    fn test_connection_error_maps_to_unavailable() {
        let err = StoreError::from(diesel::ConnectionError::BadConnection(
            "connection refused".to_string(),
        ));
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[rstest]
    fn test_error_display() {
        let err = StoreError::Constraint {
            constraint: Some("persons_email_key".to_string()),
            message: "duplicate key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "constraint violation on persons_email_key: duplicate key"
        );

        let err = StoreError::Constraint {
            constraint: None,
            message: "duplicate key".to_string(),
        };
        assert_eq!(err.to_string(), "constraint violation: duplicate key");

        let err = StoreError::NotFound { id: "7".to_string() };
        assert_eq!(err.to_string(), "no record with id 7");

        let err = ConfigError::Missing("DATABASE_URL");
        assert_eq!(err.to_string(), "environment variable DATABASE_URL must be set");
    }
}
