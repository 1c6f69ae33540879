//! Diesel and pool error mapping for the reservation adapter.

use tracing::debug;

use crate::domain::ports::ReservationPersistenceError;

use super::pool::PoolError;

/// Map pool errors to connection errors, keeping the pool's diagnostic.
pub(crate) fn map_pool_error(error: PoolError) -> ReservationPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ReservationPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to persistence errors.
///
/// Closed connections and a broken transaction manager surface as
/// connection errors; everything else is a query error.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> ReservationPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ReservationPersistenceError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ReservationPersistenceError::connection("database connection closed")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            ReservationPersistenceError::query("reservation name violates table constraint")
        }
        DieselError::DatabaseError(_, info) => {
            ReservationPersistenceError::query(info.message().to_owned())
        }
        DieselError::BrokenTransactionManager => {
            ReservationPersistenceError::connection("transaction manager is broken")
        }
        other => ReservationPersistenceError::query(other.to_string()),
    }
}
