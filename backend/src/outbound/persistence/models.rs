//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use diesel::prelude::*;

use crate::domain::ports::ReservationPersistenceError;
use crate::domain::{Reservation, ReservationId, ReservationName};

use super::schema::reservations;

/// Row struct for reading from the reservations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReservationRow {
    pub id: i32,
    pub name: String,
}

impl ReservationRow {
    /// Convert the row into a domain reservation.
    ///
    /// The table forbids empty names, so a failure here means the schema and
    /// the domain disagree.
    pub(crate) fn into_domain(self) -> Result<Reservation, ReservationPersistenceError> {
        let name = ReservationName::new(self.name).map_err(|err| {
            ReservationPersistenceError::query(format!("row {}: {err}", self.id))
        })?;
        Ok(Reservation::new(ReservationId::new(self.id), name))
    }
}

/// Insertable struct for creating reservation rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reservations)]
pub(crate) struct NewReservationRow<'a> {
    pub name: &'a str,
}
