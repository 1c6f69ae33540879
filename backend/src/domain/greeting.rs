//! Never-ending greeting streams.
//!
//! Each request yields `Hello <name> @ <timestamp> !` once per period until
//! the consumer drops the stream.

use std::sync::Arc;
use std::time::Duration;

use chrono::SecondsFormat;
use futures_util::stream::{self, BoxStream, StreamExt};
use mockable::Clock;
use thiserror::Error;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Default delay between two greetings.
pub const DEFAULT_GREETING_PERIOD: Duration = Duration::from_secs(1);

/// Errors raised when configuring a [`GreetingService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GreetingConfigError {
    /// Streams need a non-zero delay between greetings.
    #[error("greeting period must be greater than zero")]
    ZeroPeriod,
}

/// Name supplied by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingRequest {
    name: String,
}

impl GreetingRequest {
    /// Wrap a client-supplied name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name to greet.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One greeting emitted by the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingResponse {
    message: String,
}

impl GreetingResponse {
    /// Rendered greeting text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consume the response, returning the text.
    pub fn into_message(self) -> String {
        self.message
    }
}

/// Produces periodic greetings stamped by the injected clock.
#[derive(Clone)]
pub struct GreetingService {
    clock: Arc<dyn Clock>,
    period: Duration,
}

impl GreetingService {
    /// Create a service greeting once per [`DEFAULT_GREETING_PERIOD`].
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            period: DEFAULT_GREETING_PERIOD,
        }
    }

    /// Create a service with a custom period.
    ///
    /// # Errors
    ///
    /// Returns [`GreetingConfigError::ZeroPeriod`] for a zero period.
    pub fn with_period(
        clock: Arc<dyn Clock>,
        period: Duration,
    ) -> Result<Self, GreetingConfigError> {
        if period.is_zero() {
            return Err(GreetingConfigError::ZeroPeriod);
        }
        Ok(Self { clock, period })
    }

    /// Delay between consecutive greetings.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Render a single greeting at the clock's current time.
    pub fn greeting_for(&self, request: &GreetingRequest) -> GreetingResponse {
        let timestamp = self
            .clock
            .utc()
            .to_rfc3339_opts(SecondsFormat::AutoSi, true);
        GreetingResponse {
            message: format!("Hello {} @ {timestamp} !", request.name()),
        }
    }

    /// Unbounded stream of greetings, the first one after one period.
    pub fn greet(&self, request: GreetingRequest) -> BoxStream<'static, GreetingResponse> {
        let mut ticks = time::interval_at(Instant::now() + self.period, self.period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        stream::unfold(
            (ticks, self.clone(), request),
            |(mut ticks, service, request)| async move {
                ticks.tick().await;
                let greeting = service.greeting_for(&request);
                Some((greeting, (ticks, service, request)))
            },
        )
        .boxed()
    }
}
