//! Reservation service library modules.
//!
//! Layout follows a ports-and-adapters split: `domain` holds entities,
//! services, and port traits; `inbound` holds the HTTP and WebSocket
//! adapters; `outbound` holds the in-memory and PostgreSQL repositories.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod sample_data;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
