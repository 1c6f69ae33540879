//! Reservation entity and its value objects.
//!
//! A reservation is persisted once and never mutated afterwards. Unpersisted
//! reservations are represented by [`NewReservation`]; the store assigns the
//! [`ReservationId`] and hands back a [`Reservation`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised when constructing reservation values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationValidationError {
    /// The supplied name was empty.
    #[error("reservation name must not be empty")]
    EmptyName,
}

/// Store-assigned surrogate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i32);

impl ReservationId {
    /// Wrap a raw key issued by the store.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw key value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name held by a reservation.
///
/// ## Invariants
/// - Never empty.
///
/// Capitalisation is a service policy, not an entity invariant, so a
/// lowercase name is representable here and rejected later by
/// [`crate::domain::ReservationService`].
///
/// # Examples
/// ```
/// use reservation_service::domain::ReservationName;
///
/// let name = ReservationName::new("Stéphane").expect("valid name");
/// assert!(name.starts_with_uppercase());
/// assert!(ReservationName::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReservationName(String);

impl ReservationName {
    /// Validate and construct a name.
    pub fn new(value: impl Into<String>) -> Result<Self, ReservationValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ReservationValidationError::EmptyName);
        }
        Ok(Self(value))
    }

    /// Borrow the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the first character is an uppercase letter.
    #[must_use]
    pub fn starts_with_uppercase(&self) -> bool {
        self.0.chars().next().is_some_and(char::is_uppercase)
    }
}

impl AsRef<str> for ReservationName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ReservationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ReservationName {
    type Error = ReservationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReservationName> for String {
    fn from(value: ReservationName) -> Self {
        value.0
    }
}

/// Reservation awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    name: ReservationName,
}

impl NewReservation {
    /// Prepare a reservation for insertion.
    #[must_use]
    pub fn new(name: ReservationName) -> Self {
        Self { name }
    }

    /// Name to persist.
    #[must_use]
    pub fn name(&self) -> &ReservationName {
        &self.name
    }

    /// Combine with a store-assigned identifier.
    #[must_use]
    pub fn into_persisted(self, id: ReservationId) -> Reservation {
        Reservation::new(id, self.name)
    }
}

/// Persisted reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    name: ReservationName,
}

impl Reservation {
    /// Build a reservation from persisted parts.
    #[must_use]
    pub fn new(id: ReservationId, name: ReservationName) -> Self {
        Self { id, name }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> ReservationId {
        self.id
    }

    /// Reservation name.
    #[must_use]
    pub fn name(&self) -> &ReservationName {
        &self.name
    }
}
