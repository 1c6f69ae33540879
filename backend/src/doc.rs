//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the reservation listing and health probes together
//! with the shared error payload. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::reservations::ReservationResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reservation service API",
        description = "Read access to stored reservations plus health probes. \
            Greetings stream over the `/ws/greetings` WebSocket."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::reservations::list_reservations,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ReservationResponse, Error, ErrorCode)),
    tags(
        (name = "reservations", description = "Stored reservations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
