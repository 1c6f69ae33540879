//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use reservation_service::Trace;
use reservation_service::doc::ApiDoc;
use reservation_service::inbound::http::health::{HealthState, live, ready};
use reservation_service::inbound::http::reservations::list_reservations;
use reservation_service::inbound::http::state::HttpState;
use reservation_service::inbound::ws;
use reservation_service::inbound::ws::state::WsState;

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The health state is marked ready once the listener is bound. Swagger UI
/// is mounted at `/docs` in debug builds.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        repository,
        greetings,
    } = config;
    let http_state = web::Data::new(HttpState::new(repository));
    let ws_state = web::Data::new(WsState::new(greetings));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .app_data(ws_state.clone())
            .wrap(Trace)
            .service(list_reservations)
            .service(ws::greetings_entry)
            .service(ready)
            .service(live);

        if cfg!(debug_assertions) {
            app.service(
                SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
        } else {
            app
        }
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
