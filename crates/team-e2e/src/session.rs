// Session - Browser lifecycle for browser-driven scenarios
//
// One Playwright server, one browser and one page per session. Scenarios run
// inside with_session(), which closes the browser and shuts the server down
// on every exit path: Ok, Err and panic.

use crate::config::{BrowserKind, SuiteConfig};
use crate::error::Result;
use futures_util::FutureExt;
use playwright_rs::{Browser, Page, Playwright};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

/// A launched browser with a single open page.
pub struct BrowserSession {
    playwright: Playwright,
    browser: Browser,
    page: Page,
}

impl BrowserSession {
    /// Starts Playwright, launches the configured browser and opens a page.
    ///
    /// If the browser cannot be launched, the Playwright server is shut down
    /// before the error is returned.
    pub async fn launch(config: &SuiteConfig) -> Result<Self> {
        let playwright = Playwright::launch().await?;

        let browser_type = match config.browser {
            BrowserKind::Chromium => playwright.chromium(),
            BrowserKind::Firefox => playwright.firefox(),
            BrowserKind::Webkit => playwright.webkit(),
        };

        let browser = match browser_type
            .launch_with_options(config.launch_options())
            .await
        {
            Ok(browser) => browser,
            Err(e) => {
                let _ = playwright.shutdown().await;
                return Err(e.into());
            }
        };

        let page = match browser.new_page().await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = playwright.shutdown().await;
                return Err(e.into());
            }
        };

        tracing::info!(
            "Launched {:?} (headless: {})",
            config.browser,
            config.headless
        );

        Ok(Self {
            playwright,
            browser,
            page,
        })
    }

    /// The session's page
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Closes the browser, then shuts Playwright down.
    ///
    /// Shutdown is attempted even when closing the browser fails; the first
    /// error is returned.
    pub async fn close(self) -> Result<()> {
        let closed = self.browser.close().await;
        let shut_down = self.playwright.shutdown().await;
        tracing::debug!("Browser session closed");
        closed?;
        shut_down?;
        Ok(())
    }
}

/// Runs `body` against a fresh session and always releases the session.
///
/// The body's result is returned unchanged. A panic inside the body (a failed
/// assertion) is re-raised after cleanup so the test harness still sees it.
pub async fn with_session<F, Fut, T>(config: &SuiteConfig, body: F) -> Result<T>
where
    F: FnOnce(Page) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let session = BrowserSession::launch(config).await?;
    let outcome = AssertUnwindSafe(body(session.page().clone()))
        .catch_unwind()
        .await;

    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close browser session: {}", e);
    }

    match outcome {
        Ok(result) => result,
        Err(payload) => panic::resume_unwind(payload),
    }
}
