//! Drives the token-exchange loop of the device flow against the code's
//! expiry deadline.
//!
//! The loop runs as a spawned task and hands back a single terminal outcome.
//! The caller waits on whichever finishes first, the task or the deadline. If
//! the deadline wins, the task is aborted and whatever it would have produced
//! is dropped with its `JoinHandle`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, MissedTickBehavior};

use crate::models::device::{DeviceAuthorization, TokenGrant};

const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Result of one token-exchange request.
#[derive(Debug, Clone)]
pub enum TokenPoll {
    /// `authorization_pending`: try again on the next tick.
    Pending,
    Granted(TokenGrant),
    Denied,
    Expired,
    /// Anything unexpected, carrying the raw diagnostic.
    Failed(String),
}

/// Terminal result of a login attempt. Exactly one is produced per attempt.
#[derive(Debug, Clone)]
pub enum AuthorizationOutcome {
    Granted(TokenGrant),
    Denied,
    Expired,
    TimedOut,
    TransportError(String),
}

/// The token endpoint of a device authorization server.
#[async_trait]
pub trait TokenEndpoint: Send + Sync + 'static {
    async fn exchange(&self, device_code: &str, token_name: Option<&str>) -> TokenPoll;
}

/// Poll `endpoint` every `interval` seconds until it yields a terminal answer
/// or `expires_in` seconds have passed since the code was issued.
pub async fn wait_for_authorization<E: TokenEndpoint>(
    endpoint: Arc<E>,
    authorization: &DeviceAuthorization,
    token_name: Option<String>,
) -> AuthorizationOutcome {
    // tokio intervals reject a zero period.
    let period = Duration::from_secs(authorization.interval.max(1));
    // An expiry too large to represent never fires in practice.
    let deadline = authorization
        .issued_at
        .checked_add(Duration::from_secs(authorization.expires_in))
        .unwrap_or_else(|| Instant::now() + FAR_FUTURE);

    let mut poller = tokio::spawn(poll_until_terminal(
        endpoint,
        authorization.device_code.clone(),
        token_name,
        period,
    ));

    tokio::select! {
        joined = &mut poller => match joined {
            Ok(outcome) => outcome,
            Err(e) => AuthorizationOutcome::TransportError(format!("polling task failed: {e}")),
        },
        () = tokio::time::sleep_until(deadline) => {
            poller.abort();
            tracing::debug!("device code deadline reached, polling abandoned");
            AuthorizationOutcome::TimedOut
        }
    }
}

async fn poll_until_terminal<E: TokenEndpoint>(
    endpoint: Arc<E>,
    device_code: String,
    token_name: Option<String>,
    period: Duration,
) -> AuthorizationOutcome {
    let Some(first_tick) = Instant::now().checked_add(period) else {
        return AuthorizationOutcome::TransportError(format!(
            "polling interval of {}s is out of range",
            period.as_secs()
        ));
    };
    let mut ticker = tokio::time::interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut attempt: u64 = 0;
    loop {
        ticker.tick().await;
        attempt += 1;

        match endpoint.exchange(&device_code, token_name.as_deref()).await {
            TokenPoll::Pending => {
                tracing::debug!(attempt, "authorization pending");
            }
            TokenPoll::Granted(grant) => return AuthorizationOutcome::Granted(grant),
            TokenPoll::Denied => return AuthorizationOutcome::Denied,
            TokenPoll::Expired => return AuthorizationOutcome::Expired,
            TokenPoll::Failed(diagnostic) => {
                return AuthorizationOutcome::TransportError(diagnostic);
            }
        }
    }
}
