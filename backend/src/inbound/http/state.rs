//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::ReservationRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub reservations: Arc<dyn ReservationRepository>,
}

impl HttpState {
    /// Construct state from an explicit repository.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use reservation_service::inbound::http::state::HttpState;
    /// use reservation_service::outbound::memory::InMemoryReservationRepository;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryReservationRepository::new()));
    /// let _reservations = state.reservations.clone();
    /// ```
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }
}
