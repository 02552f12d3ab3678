// Progress Bar - Start/stop progress bar of the UI Testing Playground
//
// The bar advances on its own once started. The goal is to stop it as close
// to a target percentage as possible; the page then prints how far off the
// stop was and how long the run took.

use crate::error::{Error, Result};
use crate::locator::{Locate, Surface};
use crate::wait::{self, PollOutcome, WaitState};
use regex::Regex;
use std::time::Duration;

const START_BUTTON: &str = "button#startButton";
const STOP_BUTTON: &str = "button#stopButton";
const PROGRESS: &str = "#progressBar";
const RESULT: &str = "#result";
const PROGRESS_ATTRIBUTE: &str = "aria-valuenow";

/// Outcome line printed after the bar is stopped, e.g. `Result: 2, duration: 18036`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressReport {
    /// Distance between the stop value and the target (0 is a perfect stop)
    pub result: i64,
    /// Run time between start and stop
    pub duration_ms: u64,
}

impl ProgressReport {
    pub fn parse(text: &str) -> Result<Self> {
        let re = Regex::new(r"Result:\s*(-?\d+),\s*duration:\s*(\d+)")
            .map_err(|e| Error::Parse(format!("invalid result pattern: {}", e)))?;
        let caps = re
            .captures(text)
            .ok_or_else(|| Error::Parse(format!("unrecognised progress result '{}'", text)))?;

        let result = caps[1]
            .parse()
            .map_err(|e| Error::Parse(format!("result '{}': {}", &caps[1], e)))?;
        let duration_ms = caps[2]
            .parse()
            .map_err(|e| Error::Parse(format!("duration '{}': {}", &caps[2], e)))?;

        Ok(Self {
            result,
            duration_ms,
        })
    }
}

/// Page object for the Progress Bar app.
#[derive(Debug, Clone)]
pub struct ProgressBar<L> {
    start_button: L,
    stop_button: L,
    progress: L,
    result: L,
}

impl<L: Locate> ProgressBar<L> {
    pub(crate) async fn new<P>(page: &P) -> Self
    where
        P: Surface<Locator = L>,
    {
        Self {
            start_button: page.locator(START_BUTTON).await,
            stop_button: page.locator(STOP_BUTTON).await,
            progress: page.locator(PROGRESS).await,
            result: page.locator(RESULT).await,
        }
    }

    /// Waits for both buttons and the bar, each within `timeout`.
    pub async fn await_loaded(&self, timeout: Duration) -> Result<()> {
        for control in [&self.start_button, &self.stop_button, &self.progress] {
            wait::wait_for(control, WaitState::Visible, timeout).await?;
        }
        Ok(())
    }

    /// Clicks Start. Repeated clicks are not guarded against.
    pub async fn start(&self) -> Result<()> {
        self.start_button.click(None).await
    }

    /// Clicks Stop. Repeated clicks are not guarded against.
    pub async fn stop(&self) -> Result<()> {
        self.stop_button.click(None).await
    }

    /// Current percentage read off `aria-valuenow`.
    pub async fn progress(&self) -> Result<u32> {
        let value = self
            .progress
            .get_attribute(PROGRESS_ATTRIBUTE)
            .await?
            .ok_or_else(|| Error::Parse(format!("{} has no {}", PROGRESS, PROGRESS_ATTRIBUTE)))?;
        value
            .trim()
            .parse()
            .map_err(|e| Error::Parse(format!("{} '{}': {}", PROGRESS_ATTRIBUTE, value, e)))
    }

    /// Result text shown once the bar is stopped.
    pub async fn result(&self) -> Result<String> {
        self.result.inner_text().await
    }

    /// Result text parsed into a [`ProgressReport`].
    pub async fn report(&self) -> Result<ProgressReport> {
        ProgressReport::parse(&self.result().await?)
    }

    /// Polls the bar every `poll_interval` until it reads at least `target`.
    ///
    /// Running out of `timeout` is not an error: the outcome says whether the
    /// target was reached and carries the last value read, so the caller can
    /// stop the bar either way and decide what to assert.
    pub async fn await_progress(
        &self,
        target: u32,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<PollOutcome<u32>> {
        let outcome =
            wait::poll_until(move || self.progress(), |value| *value >= target, timeout, poll_interval)
                .await?;

        match &outcome {
            PollOutcome::Reached(value) => {
                tracing::debug!("Progress reached {}% (target {}%)", value, target)
            }
            PollOutcome::TimedOut(value) => tracing::warn!(
                "Progress stuck at {}% after {:?}, target was {}%",
                value,
                timeout,
                target
            ),
        }
        Ok(outcome)
    }
}
