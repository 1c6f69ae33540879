//! Startup seeding orchestration.

use tracing::{error, info};

use crate::domain::{Reservation, SampleDataInitializer};
use crate::sample_data::config::SampleDataSettings;

/// Run the seed pipeline when enabled, logging rather than returning errors.
///
/// Returns the records read back after seeding, or `None` when seeding was
/// skipped or failed. A failure never propagates: the server keeps serving
/// whatever the store holds.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use reservation_service::domain::{ReservationService, SampleDataInitializer};
/// use reservation_service::outbound::memory::InMemoryReservationRepository;
/// use reservation_service::sample_data::{SampleDataSettings, seed_sample_data_on_startup};
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let repository = Arc::new(InMemoryReservationRepository::new());
/// let service = ReservationService::new(repository.clone());
/// let initializer = SampleDataInitializer::new(service, repository);
/// let settings = SampleDataSettings { enabled: Some(false), names: None };
/// assert!(seed_sample_data_on_startup(&settings, initializer).await.is_none());
/// # });
/// ```
pub async fn seed_sample_data_on_startup(
    settings: &SampleDataSettings,
    initializer: SampleDataInitializer,
) -> Option<Vec<Reservation>> {
    if !settings.is_enabled() {
        info!(reason = "disabled", "sample data seeding skipped");
        return None;
    }

    let initializer = initializer.with_names(settings.names());
    match initializer.run().await {
        Ok(reservations) => {
            info!(count = reservations.len(), "sample data seeding applied");
            Some(reservations)
        }
        Err(err) => {
            error!(error = %err, "sample data seeding failed");
            None
        }
    }
}
