//! Reservations API handlers.
//!
//! ```text
//! GET /reservations
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Reservation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Reservation as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReservationResponse {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i32,
    /// Name the reservation was made under.
    #[schema(example = "Josh")]
    pub name: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        Self {
            id: value.id().get(),
            name: value.name().to_string(),
        }
    }
}

/// List every stored reservation ordered by identifier.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use reservation_service::inbound::http::reservations::list_reservations;
///
/// let app = App::new().service(list_reservations);
/// ```
#[utoipa::path(
    get,
    path = "/reservations",
    responses(
        (status = 200, description = "Stored reservations", body = [ReservationResponse]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Reservation store unavailable", body = Error)
    ),
    tags = ["reservations"],
    operation_id = "listReservations"
)]
#[get("/reservations")]
pub async fn list_reservations(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ReservationResponse>>> {
    let reservations = state.reservations.find_all().await?;
    Ok(web::Json(
        reservations.into_iter().map(ReservationResponse::from).collect(),
    ))
}
