// Load Delay - Page whose only button appears after a server-side delay

use crate::error::Result;
use crate::locator::{Locate, Surface};
use crate::wait::{self, WaitState};
use std::time::Duration;

const BUTTON: &str = "button";
const BUTTON_TEXT: &str = "Button Appearing After Delay";

/// Page object for the Load Delay app.
#[derive(Debug, Clone)]
pub struct LoadDelay<L> {
    button_after_delay: L,
}

impl<L: Locate> LoadDelay<L> {
    pub(crate) async fn new<P>(page: &P) -> Self
    where
        P: Surface<Locator = L>,
    {
        Self {
            button_after_delay: page.locator(BUTTON).await.filter_has_text(BUTTON_TEXT),
        }
    }

    /// Waits for the delayed button to be attached and visible.
    pub async fn await_loaded(&self, timeout: Duration) -> Result<()> {
        wait::wait_for(&self.button_after_delay, WaitState::Visible, timeout).await
    }

    /// Non-blocking visibility check; meaningful after [`Self::await_loaded`].
    pub async fn is_button_loaded(&self) -> Result<bool> {
        self.button_after_delay.is_visible().await
    }
}
