//! WebSocket inbound adapter streaming greetings to clients.
//!
//! Responsibilities:
//! - upgrade `/ws/greetings` requests
//! - spawn the per-connection session loop
//! - keep WebSocket framing concerns at the edge of the system

use actix_web::web::{self, Payload};
use actix_web::{HttpRequest, HttpResponse, get};
use tracing::warn;

mod session;

pub mod state;

/// Handle WebSocket upgrade for the `/ws/greetings` endpoint.
///
/// Every text frame the client sends is a name; the server answers with
/// `Hello <name> @ <timestamp> !` once per second for each name until the
/// connection closes. An empty name closes the connection with a policy
/// violation.
#[get("/ws/greetings")]
pub async fn greetings_entry(
    state: web::Data<state::WsState>,
    req: HttpRequest,
    stream: Payload,
) -> actix_web::Result<HttpResponse> {
    let (response, session, messages) = actix_ws::handle(&req, stream).map_err(|error| {
        warn!(error = %error, "WebSocket upgrade rejected");
        error
    })?;
    actix_web::rt::spawn(session::handle_ws_session(
        state.greetings.clone(),
        session,
        messages,
    ));
    Ok(response)
}
