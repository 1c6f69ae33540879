//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod reservation_repository;

#[cfg(test)]
pub use reservation_repository::{MockReservationRepository, MockReservationTransaction};
pub use reservation_repository::{
    ReservationPersistenceError, ReservationRepository, ReservationTransaction,
};
