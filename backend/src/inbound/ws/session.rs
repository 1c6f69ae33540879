//! Per-connection greeting session.
//!
//! Each text frame names someone to greet; the session then interleaves one
//! greeting stream per name until the client goes away. The connection is
//! pinged every 5s and considered idle after 10s without client traffic.
//! Tests shorten both intervals.

use std::time::{Duration, Instant};

use crate::domain::{GreetingRequest, GreetingResponse, GreetingService};
use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use futures_util::stream::{BoxStream, SelectAll, StreamExt};
use tokio::time;
use tracing::{debug, warn};

/// Time between heartbeats to the client (5s in production, shorter in tests).
#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Max idle time before disconnecting the client (10s in production, shorter in tests).
#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

pub(super) async fn handle_ws_session(
    greetings: GreetingService,
    session: Session,
    stream: MessageStream,
) {
    GreetingSession::new(greetings).run(session, stream).await;
}

enum SessionError {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    EmptyName,
    Network(Closed),
}

enum CloseAction {
    None,
    Close(Option<CloseReason>),
}

struct GreetingSession {
    greetings: GreetingService,
    active: SelectAll<BoxStream<'static, GreetingResponse>>,
}

impl GreetingSession {
    fn new(greetings: GreetingService) -> Self {
        Self {
            greetings,
            active: SelectAll::new(),
        }
    }

    async fn run(mut self, mut session: Session, mut stream: MessageStream) {
        let mut last_heartbeat = Instant::now();
        let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

        loop {
            let result = tokio::select! {
                _ = heartbeat.tick() => {
                    handle_heartbeat_tick(&mut session, &last_heartbeat).await
                }
                Some(greeting) = self.active.next(), if !self.active.is_empty() => {
                    session
                        .text(greeting.into_message())
                        .await
                        .map_err(SessionError::Network)
                }
                message = stream.recv() => {
                    self.handle_stream_message(&mut session, &mut last_heartbeat, message)
                        .await
                }
            };

            if let Err(error) = result {
                log_shutdown_reason(&error);
                let close_action = close_action_for(&error);
                close_session_if_needed(session, close_action).await;
                return;
            }
        }
    }

    async fn handle_stream_message(
        &mut self,
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Option<Result<Message, ProtocolError>>,
    ) -> Result<(), SessionError> {
        let Some(message) = message else {
            return Err(SessionError::StreamClosed);
        };

        match message {
            Ok(message) => self.handle_message(session, last_heartbeat, message).await,
            Err(error) => Err(SessionError::Protocol(error)),
        }
    }

    async fn handle_message(
        &mut self,
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Message,
    ) -> Result<(), SessionError> {
        *last_heartbeat = Instant::now();
        match message {
            Message::Ping(payload) => session
                .pong(&payload)
                .await
                .map_err(SessionError::Network),
            Message::Text(text) => self.start_greeting(text.as_ref()),
            Message::Pong(_) | Message::Binary(_) | Message::Continuation(_) | Message::Nop => {
                Ok(())
            }
            Message::Close(reason) => Err(SessionError::ClientClosed(reason)),
        }
    }

    /// Greet `name` exactly as sent; a blank frame ends the session.
    fn start_greeting(&mut self, name: &str) -> Result<(), SessionError> {
        if name.trim().is_empty() {
            return Err(SessionError::EmptyName);
        }
        debug!(name, streams = self.active.len() + 1, "greeting stream started");
        self.active
            .push(self.greetings.greet(GreetingRequest::new(name)));
        Ok(())
    }
}

async fn handle_heartbeat_tick(
    session: &mut Session,
    last_heartbeat: &Instant,
) -> Result<(), SessionError> {
    if Instant::now().duration_since(*last_heartbeat) > CLIENT_TIMEOUT {
        return Err(SessionError::HeartbeatTimeout);
    }

    session.ping(b"").await.map_err(SessionError::Network)
}

fn log_shutdown_reason(error: &SessionError) {
    match error {
        SessionError::HeartbeatTimeout => {
            warn!("WebSocket heartbeat timeout; closing connection");
        }
        SessionError::Protocol(error) => {
            warn!(error = %error, "WebSocket protocol error");
        }
        SessionError::Network(error) => {
            debug!(error = %error, "WebSocket send failed; greeting streams stopped");
        }
        SessionError::EmptyName => {
            warn!("Rejected empty greeting name");
        }
        SessionError::ClientClosed(_) | SessionError::StreamClosed => {
            debug!("WebSocket client disconnected; greeting streams stopped");
        }
    }
}

fn close_action_for(error: &SessionError) -> CloseAction {
    match error {
        SessionError::HeartbeatTimeout => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Normal,
            description: Some("heartbeat timeout".to_owned()),
        })),
        SessionError::Protocol(_) => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Protocol,
            description: Some("protocol error".to_owned()),
        })),
        SessionError::EmptyName => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Policy,
            description: Some("name must not be empty".to_owned()),
        })),
        SessionError::ClientClosed(reason) => CloseAction::Close(reason.clone()),
        SessionError::StreamClosed | SessionError::Network(_) => CloseAction::None,
    }
}

async fn close_session_if_needed(session: Session, close_action: CloseAction) {
    if let CloseAction::Close(reason) = close_action {
        if let Err(error) = session.close(reason).await {
            warn!(error = %error, "Failed to close WebSocket session");
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
