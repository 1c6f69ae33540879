//! Shared WebSocket adapter state.

use crate::domain::GreetingService;

/// Dependency bundle for WebSocket handlers.
#[derive(Clone)]
pub struct WsState {
    pub greetings: GreetingService,
}

impl WsState {
    /// Construct state from an explicit greeting service.
    pub fn new(greetings: GreetingService) -> Self {
        Self { greetings }
    }
}
