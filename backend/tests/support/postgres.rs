//! PostgreSQL access for integration tests.
//!
//! Suites that need a database read `TEST_DATABASE_URL`. When it is unset
//! they print a skip marker and return early, unless `REQUIRE_TEST_DATABASE`
//! is truthy, in which case the missing database is a failure so CI breakage
//! is not masked.

use std::sync::{Mutex, MutexGuard, OnceLock};

use reservation_service::domain::ports::ReservationRepository;
use reservation_service::outbound::persistence::{
    DbPool, DieselReservationRepository, PoolConfig, run_pending_migrations,
};

const DATABASE_URL_ENV: &str = "TEST_DATABASE_URL";
const REQUIRE_DATABASE_ENV: &str = "REQUIRE_TEST_DATABASE";

static DATABASE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn is_truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Repository over a freshly migrated and emptied database.
///
/// Holds a process-wide lock so suites sharing the database do not
/// interleave.
pub struct TestDatabase {
    pub repository: DieselReservationRepository,
    _guard: MutexGuard<'static, ()>,
}

/// Connect to the test database, or return `None` after printing a skip marker.
pub async fn test_database() -> Option<TestDatabase> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        assert!(
            !is_truthy(REQUIRE_DATABASE_ENV),
            "{DATABASE_URL_ENV} must be set when {REQUIRE_DATABASE_ENV} is enabled"
        );
        eprintln!("SKIP-TEST-DATABASE: {DATABASE_URL_ENV} is not set");
        return None;
    };

    let guard = DATABASE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    run_pending_migrations(&url)
        .await
        .expect("migrations apply to the test database");
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(4))
        .await
        .expect("test database pool builds");
    let repository = DieselReservationRepository::new(pool);
    repository.delete_all().await.expect("test table empties");

    Some(TestDatabase {
        repository,
        _guard: guard,
    })
}
