//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed reservation entities and the services that
//! act on them, independent of HTTP, WebSocket, or database details.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - Reservation / NewReservation / ReservationName / ReservationId: the
//!   reservation entity before and after persistence.
//! - ReservationService: bulk insert with capitalisation checks.
//! - SampleDataInitializer: startup seed pipeline.
//! - GreetingService: periodic greeting streams.
//! - TraceId: per-request correlation identifier.

pub mod error;
pub mod greeting;
pub mod ports;
pub mod reservation;
pub mod reservation_service;
pub mod sample_data;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::greeting::{
    DEFAULT_GREETING_PERIOD, GreetingConfigError, GreetingRequest, GreetingResponse,
    GreetingService,
};
pub use self::reservation::{
    NewReservation, Reservation, ReservationId, ReservationName, ReservationValidationError,
};
pub use self::reservation_service::{ReservationService, ReservationServiceError, TransactionMode};
pub use self::sample_data::{DEFAULT_SAMPLE_NAMES, SampleDataError, SampleDataInitializer};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
