//! PostgreSQL-backed reservation repository.
//!
//! Plain writes auto-commit on a pooled connection. Transaction handles own
//! their connection for their whole lifetime and drive
//! [`AnsiTransactionManager`] directly, so a batch of inserts spans several
//! awaited calls without holding a borrow on the repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::{AnsiTransactionManager, AsyncPgConnection, RunQueryDsl, TransactionManager};
use tracing::{debug, warn};

use crate::domain::ports::{
    ReservationPersistenceError, ReservationRepository, ReservationTransaction,
};
use crate::domain::{NewReservation, Reservation};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewReservationRow, ReservationRow};
use super::pool::DbPool;
use super::schema::reservations;

/// Diesel-backed implementation of [`ReservationRepository`].
#[derive(Clone)]
pub struct DieselReservationRepository {
    pool: DbPool,
}

impl DieselReservationRepository {
    /// Create a repository over the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use reservation_service::outbound::persistence::{
    ///     DbPool, DieselReservationRepository, PoolConfig,
    /// };
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/reservations")).await?;
    /// let repository = DieselReservationRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn insert_reservation(
    conn: &mut AsyncPgConnection,
    reservation: &NewReservation,
) -> Result<Reservation, ReservationPersistenceError> {
    let row = NewReservationRow {
        name: reservation.name().as_str(),
    };
    diesel::insert_into(reservations::table)
        .values(&row)
        .returning(ReservationRow::as_returning())
        .get_result(conn)
        .await
        .map_err(map_diesel_error)?
        .into_domain()
}

#[async_trait]
impl ReservationRepository for DieselReservationRepository {
    async fn save(
        &self,
        reservation: NewReservation,
    ) -> Result<Reservation, ReservationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        insert_reservation(&mut conn, &reservation).await
    }

    async fn find_all(&self) -> Result<Vec<Reservation>, ReservationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ReservationRow> = reservations::table
            .select(ReservationRow::as_select())
            .order_by(reservations::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(ReservationRow::into_domain).collect()
    }

    async fn delete_all(&self) -> Result<u64, ReservationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(reservations::table)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(removed)
            .map_err(|_| ReservationPersistenceError::query("deleted row count overflow"))
    }

    async fn begin(&self) -> Result<Box<dyn ReservationTransaction>, ReservationPersistenceError> {
        let mut conn = self.pool.get_owned().await.map_err(map_pool_error)?;
        AnsiTransactionManager::begin_transaction(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        debug!("reservation transaction opened");
        Ok(Box::new(DieselReservationTransaction { conn: Some(conn) }))
    }
}

/// Transaction handle owning its pooled connection.
///
/// The connection is released on commit or rollback. Dropping the handle
/// while the transaction is open returns a connection with an open
/// transaction to the pool, which discards it; the server then rolls back.
struct DieselReservationTransaction {
    conn: Option<PooledConnection<'static, AsyncPgConnection>>,
}

impl DieselReservationTransaction {
    fn open_connection(&mut self) -> Result<&mut AsyncPgConnection, ReservationPersistenceError> {
        self.conn
            .as_deref_mut()
            .ok_or_else(|| ReservationPersistenceError::query("transaction already finished"))
    }

    fn take_connection(
        &mut self,
    ) -> Result<PooledConnection<'static, AsyncPgConnection>, ReservationPersistenceError> {
        self.conn
            .take()
            .ok_or_else(|| ReservationPersistenceError::query("transaction already finished"))
    }
}

#[async_trait]
impl ReservationTransaction for DieselReservationTransaction {
    async fn save(
        &mut self,
        reservation: NewReservation,
    ) -> Result<Reservation, ReservationPersistenceError> {
        let conn = self.open_connection()?;
        insert_reservation(conn, &reservation).await
    }

    async fn commit(&mut self) -> Result<(), ReservationPersistenceError> {
        let mut conn = self.take_connection()?;
        AnsiTransactionManager::commit_transaction(&mut *conn)
            .await
            .map_err(map_diesel_error)?;
        debug!("reservation transaction committed");
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), ReservationPersistenceError> {
        let mut conn = self.take_connection()?;
        if let Err(err) = AnsiTransactionManager::rollback_transaction(&mut *conn).await {
            warn!(error = %err, "reservation transaction rollback failed");
            return Err(map_diesel_error(err));
        }
        debug!("reservation transaction rolled back");
        Ok(())
    }
}
