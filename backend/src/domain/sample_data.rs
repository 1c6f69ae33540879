//! Sample data seeding pipeline.
//!
//! Runs `delete_all → save_all → find_all` strictly in that order so every
//! start leaves the store holding exactly the configured names, whatever it
//! held before.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::ports::{ReservationPersistenceError, ReservationRepository};
use crate::domain::{Reservation, ReservationService, ReservationServiceError};

/// Names inserted when no override is configured.
pub const DEFAULT_SAMPLE_NAMES: [&str; 8] = [
    "Josh", "Madhura", "Mark", "Olga", "Spencer", "Ria", "Stéphane", "Violetta",
];

/// Errors raised while seeding; each aborts the remaining stages.
#[derive(Debug, Error)]
pub enum SampleDataError {
    /// Existing reservations could not be removed.
    #[error("failed to clear reservations: {0}")]
    Clear(#[source] ReservationPersistenceError),
    /// Inserting or validating the sample names failed.
    #[error("failed to insert sample reservations: {0}")]
    Insert(#[from] ReservationServiceError),
    /// The verification read failed.
    #[error("failed to read back reservations: {0}")]
    Verify(#[source] ReservationPersistenceError),
}

/// Clears the store, inserts the sample names, and logs what was stored.
#[derive(Clone)]
pub struct SampleDataInitializer {
    service: ReservationService,
    repository: Arc<dyn ReservationRepository>,
    names: Vec<String>,
}

impl SampleDataInitializer {
    /// Create an initializer seeding [`DEFAULT_SAMPLE_NAMES`].
    pub fn new(service: ReservationService, repository: Arc<dyn ReservationRepository>) -> Self {
        Self {
            service,
            repository,
            names: DEFAULT_SAMPLE_NAMES.iter().map(|name| (*name).to_owned()).collect(),
        }
    }

    /// Replace the names to seed.
    #[must_use]
    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }

    /// Names this initializer inserts.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Run the seed pipeline and return the records read back afterwards.
    ///
    /// # Errors
    ///
    /// Returns the [`SampleDataError`] of the first failing stage; later
    /// stages are not attempted.
    pub async fn run(&self) -> Result<Vec<Reservation>, SampleDataError> {
        let removed = self
            .repository
            .delete_all()
            .await
            .map_err(SampleDataError::Clear)?;
        debug!(removed, "existing reservations cleared");

        let saved = self.service.save_all(self.names.iter().cloned()).await?;
        debug!(saved = saved.len(), "sample reservations inserted");

        let reservations = self
            .repository
            .find_all()
            .await
            .map_err(SampleDataError::Verify)?;
        for reservation in &reservations {
            info!(id = %reservation.id(), name = %reservation.name(), "reservation");
        }
        Ok(reservations)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the seed pipeline ordering and failure handling.

    use super::*;
    use crate::domain::ports::{MockReservationRepository, MockReservationTransaction};
    use crate::domain::{NewReservation, ReservationId, TransactionMode};
    use crate::outbound::memory::InMemoryReservationRepository;
    use mockall::Sequence;
    use rstest::rstest;

    fn initializer_over(repository: Arc<dyn ReservationRepository>) -> SampleDataInitializer {
        let service = ReservationService::new(Arc::clone(&repository));
        SampleDataInitializer::new(service, repository)
    }

    #[rstest]
    #[tokio::test]
    async fn seeds_every_default_name_with_an_id() {
        let initializer = initializer_over(Arc::new(InMemoryReservationRepository::new()));

        let reservations = initializer.run().await.expect("seed succeeds");

        let names: Vec<&str> = reservations.iter().map(|r| r.name().as_str()).collect();
        assert_eq!(names, DEFAULT_SAMPLE_NAMES);
    }

    #[rstest]
    #[tokio::test]
    async fn seeding_twice_does_not_duplicate_rows() {
        let initializer = initializer_over(Arc::new(InMemoryReservationRepository::new()));

        initializer.run().await.expect("first seed");
        let reservations = initializer.run().await.expect("second seed");

        assert_eq!(reservations.len(), DEFAULT_SAMPLE_NAMES.len());
    }

    #[rstest]
    #[tokio::test]
    async fn replaces_stale_rows() {
        let repository = InMemoryReservationRepository::new();
        let stale = crate::domain::ReservationName::new("Stale").expect("valid name");
        repository
            .save(NewReservation::new(stale))
            .await
            .expect("seed stale row");
        let initializer = initializer_over(Arc::new(repository))
            .with_names(vec!["Josh".to_owned(), "Madhura".to_owned(), "Mark".to_owned()]);

        let reservations = initializer.run().await.expect("seed succeeds");

        let names: Vec<&str> = reservations.iter().map(|r| r.name().as_str()).collect();
        assert_eq!(names, ["Josh", "Madhura", "Mark"]);
    }

    #[rstest]
    #[tokio::test]
    async fn runs_stages_in_order() {
        let mut seq = Sequence::new();
        let mut repository = MockReservationRepository::new();
        repository
            .expect_delete_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(3));
        repository
            .expect_begin()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|| {
                let mut transaction = MockReservationTransaction::new();
                transaction
                    .expect_save()
                    .returning(|reservation| Ok(reservation.into_persisted(ReservationId::new(1))));
                transaction.expect_commit().times(1).returning(|| Ok(()));
                Ok(Box::new(transaction) as Box<dyn crate::domain::ports::ReservationTransaction>)
            });
        repository
            .expect_find_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Vec::new()));

        let initializer = initializer_over(Arc::new(repository));
        initializer.run().await.expect("seed succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn failed_delete_aborts_the_pipeline() {
        let mut repository = MockReservationRepository::new();
        repository
            .expect_delete_all()
            .returning(|| Err(ReservationPersistenceError::connection("refused")));
        repository.expect_begin().times(0);
        repository.expect_find_all().times(0);

        let error = initializer_over(Arc::new(repository))
            .run()
            .await
            .expect_err("delete failure must abort");

        assert!(matches!(error, SampleDataError::Clear(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_name_skips_the_verification_read() {
        let mut repository = MockReservationRepository::new();
        repository.expect_delete_all().returning(|| Ok(0));
        repository.expect_save().times(0);
        repository.expect_find_all().times(0);
        let repository: Arc<dyn ReservationRepository> = Arc::new(repository);
        let service =
            ReservationService::with_mode(Arc::clone(&repository), TransactionMode::AutoCommit);

        let error = SampleDataInitializer::new(service, repository)
            .with_names(vec![String::new()])
            .run()
            .await
            .expect_err("empty name must abort");

        assert!(matches!(
            error,
            SampleDataError::Insert(ReservationServiceError::InvalidName(_))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn lowercase_seed_leaves_store_empty_when_transactional() {
        let repository = Arc::new(InMemoryReservationRepository::new());
        let initializer = initializer_over(repository.clone()).with_names(vec!["josh".to_owned()]);

        let error = initializer.run().await.expect_err("lowercase must fail");

        assert!(matches!(
            error,
            SampleDataError::Insert(ReservationServiceError::CapitalisationRequired { .. })
        ));
        assert!(repository.find_all().await.expect("find all").is_empty());
    }
}
