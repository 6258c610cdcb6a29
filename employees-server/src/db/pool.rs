//! Database connection pool management
//!
//! Startup connects through a small state machine:
//!
//! ```text
//! Connecting{1} --fail--> Connecting{2} --fail--> ... Connecting{max} --fail--> Failed
//!       \______________________ ok ______________________/
//!                                  v
//!                              Connected
//! ```
//!
//! Each failed attempt waits `base_delay * 2^(attempt - 1)` before the next
//! transition, so the default policy sleeps 1s, 2s, 4s, 8s, 16s.

use std::fmt::Display;
use std::future::Future;
use std::io;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgConnection, PgPoolOptions};
use sqlx::{Connection, PgPool};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Upper bound on a single connection attempt (hung hosts, dropped SYNs).
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of connection attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Bounded exponential backoff for startup connectivity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay after the given (1-based) failed attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exponent)
    }
}

/// Connection lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectState {
    Connecting { attempt: u32 },
    Connected,
    Failed { attempts: u32 },
}

impl ConnectState {
    /// Initial state for a policy.
    pub fn start(policy: &RetryPolicy) -> Self {
        if policy.max_attempts == 0 {
            Self::Failed { attempts: 0 }
        } else {
            Self::Connecting { attempt: 1 }
        }
    }

    /// Transition after a successful attempt.
    pub fn succeed(self) -> Self {
        match self {
            Self::Connecting { .. } => Self::Connected,
            other => other,
        }
    }

    /// Transition after a failed attempt.
    pub fn fail(self, policy: &RetryPolicy) -> Self {
        match self {
            Self::Connecting { attempt } if attempt >= policy.max_attempts => {
                Self::Failed { attempts: attempt }
            }
            Self::Connecting { attempt } => Self::Connecting {
                attempt: attempt + 1,
            },
            other => other,
        }
    }
}

/// Connection error
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("could not connect to database after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

/// Drive `connect` through the retry state machine.
///
/// `connect` receives the 1-based attempt number.
pub async fn connect_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut connect: F,
) -> Result<T, ConnectError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut state = ConnectState::start(policy);
    let mut last_error = String::from("no connection attempts allowed");

    while let ConnectState::Connecting { attempt } = state {
        match connect(attempt).await {
            Ok(conn) => {
                state = state.succeed();
                tracing::info!(attempt, ?state, "Connected to database");
                return Ok(conn);
            }
            Err(e) => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    retry_in_secs = delay.as_secs_f64(),
                    error = %e,
                    "Error connecting to database"
                );
                last_error = e.to_string();
                tokio::time::sleep(delay).await;
                state = state.fail(policy);
            }
        }
    }

    let attempts = match state {
        ConnectState::Failed { attempts } => attempts,
        _ => policy.max_attempts,
    };
    tracing::error!(attempts, "Giving up on database connection");
    Err(ConnectError::Exhausted {
        attempts,
        last_error,
    })
}

/// Create a PostgreSQL connection pool, retrying per `policy`.
///
/// Each attempt is a single connection plus ping, bounded by
/// [`ATTEMPT_TIMEOUT`]. The pool itself is built lazily once that succeeds,
/// so a refused connection fails the attempt right away with the driver's
/// own error.
pub async fn create_pool(
    options: PgConnectOptions,
    policy: &RetryPolicy,
) -> Result<PgPool, ConnectError> {
    connect_with_retry(policy, |attempt| {
        let options = options.clone();
        async move {
            tracing::debug!(attempt, "Opening database connection");
            ping_once(&options).await?;
            Ok::<_, sqlx::Error>(
                PgPoolOptions::new()
                    .max_connections(DEFAULT_MAX_CONNECTIONS)
                    .connect_lazy_with(options),
            )
        }
    })
    .await
}

/// Open one connection, ping it and close it.
async fn ping_once(options: &PgConnectOptions) -> Result<(), sqlx::Error> {
    let connect = async {
        let mut conn = PgConnection::connect_with(options).await?;
        conn.ping().await?;
        conn.close().await
    };

    match tokio::time::timeout(ATTEMPT_TIMEOUT, connect).await {
        Ok(result) => result,
        Err(_) => Err(sqlx::Error::Io(io::Error::new(
            io::ErrorKind::TimedOut,
            format!(
                "connection attempt timed out after {}s",
                ATTEMPT_TIMEOUT.as_secs()
            ),
        ))),
    }
}
