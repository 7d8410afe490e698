//! Startup sequencing
//!
//! Waits for the data store with a bounded number of fixed-delay probes,
//! then initializes the schema exactly once. Nothing else runs until this
//! completes; exhausting the attempts aborts startup.

use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::db::{ensure_schema, DatabaseError, ItemStore};

/// Errors that abort process startup
#[derive(Debug, Error)]
pub enum StartupError {
    /// Every connection probe failed
    #[error("Could not connect to the database after {attempts} attempts: {last_error}")]
    ConnectionExhausted {
        attempts: u32,
        #[source]
        last_error: DatabaseError,
    },

    /// Table creation or seeding failed
    #[error("Database initialization failed: {0}")]
    Initialization(#[source] DatabaseError),
}

/// How long to wait for the store before giving up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Total number of connection probes
    pub max_attempts: u32,

    /// Fixed pause between probes
    pub delay: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_millis(5000),
        }
    }
}

impl ReadinessPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Outcome of a successful startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupReport {
    /// Probe number that succeeded (1-based)
    pub attempts: u32,

    /// Whether the sample rows were inserted
    pub seeded: bool,
}

/// Probe the store until it answers or the attempts run out
///
/// Returns the 1-based attempt that succeeded. There is no pause after the
/// final failed probe.
pub async fn wait_for_ready<S>(store: &S, policy: &ReadinessPolicy) -> Result<u32, StartupError>
where
    S: ItemStore + ?Sized,
{
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts {
        match store.ping().await {
            Ok(()) => {
                info!(attempt, "Successfully connected to the database");
                return Ok(attempt);
            }
            Err(err) => {
                if err.is_connectivity() {
                    warn!(
                        attempt,
                        max_attempts = policy.max_attempts,
                        error = %err,
                        "Database not reachable yet"
                    );
                } else {
                    warn!(
                        attempt,
                        max_attempts = policy.max_attempts,
                        error = %err,
                        "Database connection attempt failed"
                    );
                }
                last_error = Some(err);

                if attempt < policy.max_attempts {
                    debug!(delay_ms = policy.delay.as_millis() as u64, "Retrying database connection");
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    Err(StartupError::ConnectionExhausted {
        attempts: policy.max_attempts,
        last_error: last_error
            .unwrap_or_else(|| DatabaseError::Other("no connection attempts were made".to_string())),
    })
}

/// Wait for the store, then create and seed the schema
pub async fn bootstrap<S>(store: &S, policy: &ReadinessPolicy) -> Result<StartupReport, StartupError>
where
    S: ItemStore + ?Sized,
{
    info!("Initializing database...");
    let attempts = wait_for_ready(store, policy).await?;
    let seeded = ensure_schema(store)
        .await
        .map_err(StartupError::Initialization)?;

    Ok(StartupReport { attempts, seeded })
}
