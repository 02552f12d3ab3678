// Wait - Polling primitives for page readiness
//
// Two flavours of bounded polling:
// - wait_for(): hard wait. The element must reach the requested state before
//   the deadline, otherwise Error::Timeout.
// - poll_until(): soft wait. Reads a value until a predicate holds or the
//   deadline passes, and reports which of the two happened as a PollOutcome.
//   Running out of time is not an error.
//
// Both loops follow the same shape: read, check, check deadline, sleep.

use crate::error::{Error, Result};
use crate::locator::Locate;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Default timeout for element waits (30 seconds, matching Playwright)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Element state a hard wait can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitState {
    /// At least one element matches the selector
    Attached,
    /// The element is attached and rendered visibly
    Visible,
}

impl fmt::Display for WaitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitState::Attached => write!(f, "attached"),
            WaitState::Visible => write!(f, "visible"),
        }
    }
}

/// Result of a soft poll.
///
/// Both variants carry the last value read, so callers can still act on (or
/// assert about) where things stood when polling stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum PollOutcome<T> {
    /// The predicate held for this value before the deadline
    Reached(T),
    /// The deadline passed; this was the last value read
    TimedOut(T),
}

impl<T> PollOutcome<T> {
    pub fn is_reached(&self) -> bool {
        matches!(self, PollOutcome::Reached(_))
    }

    pub fn value(&self) -> &T {
        match self {
            PollOutcome::Reached(v) | PollOutcome::TimedOut(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            PollOutcome::Reached(v) | PollOutcome::TimedOut(v) => v,
        }
    }
}

/// Waits until `locator` reaches `state`, polling at [`DEFAULT_POLL_INTERVAL`].
///
/// Fails with [`Error::Timeout`] if the state is not reached within `timeout`.
pub async fn wait_for<L: Locate>(locator: &L, state: WaitState, timeout: Duration) -> Result<()> {
    wait_for_with_interval(locator, state, timeout, DEFAULT_POLL_INTERVAL).await
}

/// Same as [`wait_for`] with an explicit polling interval.
pub async fn wait_for_with_interval<L: Locate>(
    locator: &L,
    state: WaitState,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<()> {
    let start = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let matches = match state {
            WaitState::Attached => locator.count().await? > 0,
            WaitState::Visible => locator.is_visible().await?,
        };

        if matches {
            tracing::debug!(
                "'{}' is {} after {} attempt(s), {:?}",
                locator.selector(),
                state,
                attempts,
                start.elapsed()
            );
            return Ok(());
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Err(Error::Timeout {
                selector: locator.selector().to_string(),
                state: state.to_string(),
                timeout,
            });
        }

        tokio::time::sleep(poll_interval.min(timeout - elapsed)).await;
    }
}

/// Repeatedly reads a value until `done` accepts it or `timeout` elapses.
///
/// The reader always runs at least once. Read errors abort polling and are
/// returned as-is; only running out of time is folded into the outcome.
pub async fn poll_until<T, F, Fut, P>(
    mut read: F,
    done: P,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<PollOutcome<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&T) -> bool,
{
    let start = Instant::now();

    loop {
        let value = read().await?;

        if done(&value) {
            return Ok(PollOutcome::Reached(value));
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Ok(PollOutcome::TimedOut(value));
        }

        tokio::time::sleep(poll_interval.min(timeout - elapsed)).await;
    }
}
