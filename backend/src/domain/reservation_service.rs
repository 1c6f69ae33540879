//! Bulk reservation insertion with capitalisation checks.
//!
//! Names are persisted one row each and validated after the store hands the
//! row back. In [`TransactionMode::Transactional`] all rows share one
//! transaction which is committed only when every row passes; in
//! [`TransactionMode::AutoCommit`] rows saved before a failure remain.

use std::sync::Arc;

use futures_util::future::try_join_all;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::ports::{
    ReservationPersistenceError, ReservationRepository, ReservationTransaction,
};
use crate::domain::{NewReservation, Reservation, ReservationName, ReservationValidationError};

/// Errors returned by [`ReservationService::save_all`].
#[derive(Debug, Error)]
pub enum ReservationServiceError {
    /// A name could not be turned into a reservation at all.
    #[error("invalid reservation name: {0}")]
    InvalidName(#[from] ReservationValidationError),
    /// A stored name does not start with an uppercase letter.
    #[error("the name must have a capital first letter (got {name:?})")]
    CapitalisationRequired {
        /// Offending name.
        name: String,
    },
    /// The repository failed; the underlying error is passed through.
    #[error(transparent)]
    Persistence(#[from] ReservationPersistenceError),
}

/// Whether [`ReservationService::save_all`] wraps its writes in a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionMode {
    /// All writes of one call commit or roll back together.
    #[default]
    Transactional,
    /// Each write commits on its own.
    AutoCommit,
}

/// Orchestrates bulk reservation inserts.
#[derive(Clone)]
pub struct ReservationService {
    repository: Arc<dyn ReservationRepository>,
    mode: TransactionMode,
}

impl ReservationService {
    /// Create a transactional service over the given repository.
    pub fn new(repository: Arc<dyn ReservationRepository>) -> Self {
        Self::with_mode(repository, TransactionMode::Transactional)
    }

    /// Create a service with an explicit transaction mode.
    pub fn with_mode(repository: Arc<dyn ReservationRepository>, mode: TransactionMode) -> Self {
        Self { repository, mode }
    }

    /// Configured transaction mode.
    pub fn mode(&self) -> TransactionMode {
        self.mode
    }

    /// Persist one reservation per name and return the stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationServiceError::InvalidName`] before any write when a
    /// name is empty, [`ReservationServiceError::CapitalisationRequired`] when
    /// a stored name starts with anything but an uppercase letter, and
    /// [`ReservationServiceError::Persistence`] for repository failures.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use reservation_service::domain::ReservationService;
    /// use reservation_service::outbound::memory::InMemoryReservationRepository;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let service = ReservationService::new(Arc::new(InMemoryReservationRepository::new()));
    /// let saved = service.save_all(["Josh", "Madhura"]).await.expect("valid names");
    /// assert_eq!(saved.len(), 2);
    /// assert!(service.save_all(["josh"]).await.is_err());
    /// # });
    /// ```
    pub async fn save_all<I, S>(&self, names: I) -> Result<Vec<Reservation>, ReservationServiceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pending = names
            .into_iter()
            .map(|name| ReservationName::new(name).map(NewReservation::new))
            .collect::<Result<Vec<_>, _>>()?;

        match self.mode {
            TransactionMode::Transactional => self.save_all_in_transaction(pending).await,
            TransactionMode::AutoCommit => self.save_all_auto_commit(pending).await,
        }
    }

    async fn save_all_in_transaction(
        &self,
        pending: Vec<NewReservation>,
    ) -> Result<Vec<Reservation>, ReservationServiceError> {
        let mut transaction = self.repository.begin().await?;
        match insert_validated(transaction.as_mut(), pending).await {
            Ok(saved) => {
                transaction.commit().await?;
                debug!(count = saved.len(), "reservation batch committed");
                Ok(saved)
            }
            Err(error) => {
                if let Err(rollback_error) = transaction.rollback().await {
                    warn!(error = %rollback_error, "reservation batch rollback failed");
                }
                debug!(error = %error, "reservation batch rolled back");
                Err(error)
            }
        }
    }

    async fn save_all_auto_commit(
        &self,
        pending: Vec<NewReservation>,
    ) -> Result<Vec<Reservation>, ReservationServiceError> {
        let repository = &self.repository;
        try_join_all(pending.into_iter().map(|reservation| async move {
            let stored = repository.save(reservation).await?;
            ensure_capitalised(&stored)?;
            Ok::<_, ReservationServiceError>(stored)
        }))
        .await
    }
}

async fn insert_validated(
    transaction: &mut dyn ReservationTransaction,
    pending: Vec<NewReservation>,
) -> Result<Vec<Reservation>, ReservationServiceError> {
    let mut saved = Vec::with_capacity(pending.len());
    for reservation in pending {
        let stored = transaction.save(reservation).await?;
        ensure_capitalised(&stored)?;
        saved.push(stored);
    }
    Ok(saved)
}

fn ensure_capitalised(reservation: &Reservation) -> Result<(), ReservationServiceError> {
    if reservation.name().starts_with_uppercase() {
        Ok(())
    } else {
        Err(ReservationServiceError::CapitalisationRequired {
            name: reservation.name().to_string(),
        })
    }
}
