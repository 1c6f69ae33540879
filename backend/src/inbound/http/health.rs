//! Liveness and readiness probes.
//!
//! Readiness flips once the listener is bound; seeding runs afterwards and
//! never affects either probe. Liveness holds for as long as the process can
//! answer at all.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::http::StatusCode;
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{HttpResponse, HttpResponseBuilder, get, web};

/// Listener readiness shared between the server and the probe handlers.
#[derive(Debug, Default)]
pub struct HealthState {
    listening: AtomicBool,
}

impl HealthState {
    /// Create a state that is not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the listener is bound and accepting connections.
    pub fn mark_ready(&self) {
        self.listening.store(true, Ordering::Release);
    }

    /// Whether the listener has been bound.
    pub fn is_ready(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }
}

fn uncached(status: StatusCode) -> HttpResponse {
    HttpResponseBuilder::new(status)
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .finish()
}

/// Readiness probe: 200 once the server accepts traffic, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Listener bound; reservations are served"),
        (status = 503, description = "Listener not bound yet")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    if state.is_ready() {
        uncached(StatusCode::OK)
    } else {
        uncached(StatusCode::SERVICE_UNAVAILABLE)
    }
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Process is answering requests"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    uncached(StatusCode::OK)
}
