//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use reservation_service::domain::GreetingService;
use reservation_service::domain::ports::ReservationRepository;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repository: Arc<dyn ReservationRepository>,
    pub(crate) greetings: GreetingService,
}

impl ServerConfig {
    /// Construct a server configuration from its adapters.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        repository: Arc<dyn ReservationRepository>,
        greetings: GreetingService,
    ) -> Self {
        Self {
            bind_addr,
            repository,
            greetings,
        }
    }
}
