//! Process-local reservation store used when no database is configured.
//!
//! Identifiers come from a monotonically increasing counter, mirroring a
//! database sequence: ids handed out inside a rolled-back transaction are not
//! reused.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ReservationPersistenceError, ReservationRepository, ReservationTransaction,
};
use crate::domain::{NewReservation, Reservation, ReservationId, ReservationName};

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    rows: BTreeMap<ReservationId, ReservationName>,
}

impl Store {
    fn next_id(&mut self) -> Result<ReservationId, ReservationPersistenceError> {
        self.last_id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| ReservationPersistenceError::query("reservation id sequence exhausted"))?;
        Ok(ReservationId::new(self.last_id))
    }
}

/// In-memory implementation of [`ReservationRepository`].
///
/// Clones share the same underlying store.
///
/// # Examples
/// ```
/// use reservation_service::domain::ports::ReservationRepository;
/// use reservation_service::domain::{NewReservation, ReservationName};
/// use reservation_service::outbound::memory::InMemoryReservationRepository;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let repository = InMemoryReservationRepository::new();
/// let name = ReservationName::new("Olga").expect("valid name");
/// let saved = repository.save(NewReservation::new(name)).await.expect("save");
/// assert_eq!(saved.id().get(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryReservationRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryReservationRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock(store: &Mutex<Store>) -> MutexGuard<'_, Store> {
    store.lock().unwrap_or_else(|err| err.into_inner())
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn save(
        &self,
        reservation: NewReservation,
    ) -> Result<Reservation, ReservationPersistenceError> {
        let mut store = lock(&self.store);
        let id = store.next_id()?;
        store.rows.insert(id, reservation.name().clone());
        Ok(reservation.into_persisted(id))
    }

    async fn find_all(&self) -> Result<Vec<Reservation>, ReservationPersistenceError> {
        let store = lock(&self.store);
        Ok(store
            .rows
            .iter()
            .map(|(id, name)| Reservation::new(*id, name.clone()))
            .collect())
    }

    async fn delete_all(&self) -> Result<u64, ReservationPersistenceError> {
        let mut store = lock(&self.store);
        let removed = std::mem::take(&mut store.rows).len();
        u64::try_from(removed)
            .map_err(|_| ReservationPersistenceError::query("deleted row count overflow"))
    }

    async fn begin(&self) -> Result<Box<dyn ReservationTransaction>, ReservationPersistenceError> {
        Ok(Box::new(InMemoryTransaction {
            store: Arc::clone(&self.store),
            staged: Vec::new(),
            finished: false,
        }))
    }
}

/// Buffered writes applied to the shared store on commit.
struct InMemoryTransaction {
    store: Arc<Mutex<Store>>,
    staged: Vec<Reservation>,
    finished: bool,
}

impl InMemoryTransaction {
    fn ensure_open(&self) -> Result<(), ReservationPersistenceError> {
        if self.finished {
            return Err(ReservationPersistenceError::query(
                "transaction already finished",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationTransaction for InMemoryTransaction {
    async fn save(
        &mut self,
        reservation: NewReservation,
    ) -> Result<Reservation, ReservationPersistenceError> {
        self.ensure_open()?;
        let id = lock(&self.store).next_id()?;
        let persisted = reservation.into_persisted(id);
        self.staged.push(persisted.clone());
        Ok(persisted)
    }

    async fn commit(&mut self) -> Result<(), ReservationPersistenceError> {
        self.ensure_open()?;
        self.finished = true;
        let mut store = lock(&self.store);
        for reservation in self.staged.drain(..) {
            store
                .rows
                .insert(reservation.id(), reservation.name().clone());
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), ReservationPersistenceError> {
        self.ensure_open()?;
        self.finished = true;
        self.staged.clear();
        Ok(())
    }
}
