//! Port abstraction for reservation persistence adapters and their errors.
//!
//! Adapters expose plain auto-committed writes plus an explicit transaction
//! handle. The handle must roll back on [`ReservationTransaction::rollback`]
//! and must also leave no committed rows behind when dropped without
//! [`ReservationTransaction::commit`].

use async_trait::async_trait;

use crate::domain::{NewReservation, Reservation};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by reservation repository adapters.
    pub enum ReservationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "reservation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "reservation repository query failed: {message}",
    }
}

/// Scoped write handle; every `save` is visible only after `commit`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationTransaction: Send {
    /// Insert a reservation inside the transaction.
    async fn save(
        &mut self,
        reservation: NewReservation,
    ) -> Result<Reservation, ReservationPersistenceError>;

    /// Make all writes durable.
    async fn commit(&mut self) -> Result<(), ReservationPersistenceError>;

    /// Discard all writes.
    async fn rollback(&mut self) -> Result<(), ReservationPersistenceError>;
}

/// Port for reservation storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a reservation, returning it with its store-assigned identifier.
    async fn save(
        &self,
        reservation: NewReservation,
    ) -> Result<Reservation, ReservationPersistenceError>;

    /// Fetch every reservation ordered by identifier.
    async fn find_all(&self) -> Result<Vec<Reservation>, ReservationPersistenceError>;

    /// Remove every reservation, returning the number of rows removed.
    async fn delete_all(&self) -> Result<u64, ReservationPersistenceError>;

    /// Open a transaction for a batch of writes.
    async fn begin(&self) -> Result<Box<dyn ReservationTransaction>, ReservationPersistenceError>;
}
