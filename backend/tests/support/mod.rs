//! Shared helpers for integration tests.

use std::sync::Arc;

use actix_web::{App, test as actix_test, web};
use reservation_service::Trace;
use reservation_service::domain::ports::ReservationRepository;
use reservation_service::inbound::http::reservations::{ReservationResponse, list_reservations};
use reservation_service::inbound::http::state::HttpState;

/// Build the HTTP surface over `repository` and fetch `GET /reservations`.
pub async fn fetch_reservations(
    repository: Arc<dyn ReservationRepository>,
) -> Vec<ReservationResponse> {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(repository)))
            .wrap(Trace)
            .service(list_reservations),
    )
    .await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/reservations")
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "status {}", response.status());
    actix_test::read_body_json(response).await
}

/// Names of `reservations` in order.
pub fn names_of(reservations: &[ReservationResponse]) -> Vec<&str> {
    reservations
        .iter()
        .map(|reservation| reservation.name.as_str())
        .collect()
}
