// Playground - Overview page and app registry of the UI Testing Playground
//
// The overview lists every app as a link. Selecting one clicks the link and
// hands back the page object for that app, picked by an exhaustive match over
// the closed set of apps this suite models.

use crate::error::{Error, Result};
use crate::locator::{Locate, Surface};
use crate::pages::{LoadDelay, ProgressBar, SampleApp};
use crate::wait::{self, DEFAULT_TIMEOUT, WaitState};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const MENU: &str = "#overview a";

/// An app reachable from the playground overview, identified by its menu label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum App {
    SampleApp,
    LoadDelay,
    ProgressBar,
}

impl App {
    /// Every modelled app, in menu order.
    pub const ALL: [App; 3] = [App::SampleApp, App::LoadDelay, App::ProgressBar];

    /// Literal text of the app's overview link.
    pub fn label(self) -> &'static str {
        match self {
            App::SampleApp => "Sample App",
            App::LoadDelay => "Load Delay",
            App::ProgressBar => "Progress Bar",
        }
    }
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for App {
    type Err = Error;

    fn from_str(label: &str) -> Result<Self> {
        App::ALL
            .into_iter()
            .find(|app| app.label() == label)
            .ok_or_else(|| Error::UnknownApp(label.to_string()))
    }
}

/// Page object for whichever app was opened from the menu.
#[derive(Debug, Clone)]
pub enum AppPage<L> {
    SampleApp(SampleApp<L>),
    LoadDelay(LoadDelay<L>),
    ProgressBar(ProgressBar<L>),
}

impl<L: Locate> AppPage<L> {
    /// The app this page object models.
    pub fn app(&self) -> App {
        match self {
            AppPage::SampleApp(_) => App::SampleApp,
            AppPage::LoadDelay(_) => App::LoadDelay,
            AppPage::ProgressBar(_) => App::ProgressBar,
        }
    }

    /// Runs the concrete page object's readiness wait.
    pub async fn await_loaded(&self, timeout: Duration) -> Result<()> {
        match self {
            AppPage::SampleApp(app) => app.await_loaded(timeout).await,
            AppPage::LoadDelay(app) => app.await_loaded(timeout).await,
            AppPage::ProgressBar(app) => app.await_loaded(timeout).await,
        }
    }

    pub fn into_sample_app(self) -> Option<SampleApp<L>> {
        match self {
            AppPage::SampleApp(app) => Some(app),
            _ => None,
        }
    }

    pub fn into_load_delay(self) -> Option<LoadDelay<L>> {
        match self {
            AppPage::LoadDelay(app) => Some(app),
            _ => None,
        }
    }

    pub fn into_progress_bar(self) -> Option<ProgressBar<L>> {
        match self {
            AppPage::ProgressBar(app) => Some(app),
            _ => None,
        }
    }
}

/// Page object for the playground overview.
pub struct Playground<P: Surface> {
    page: P,
    url: String,
    menu: P::Locator,
}

impl<P: Surface> Playground<P> {
    pub async fn new(page: P, base_url: impl Into<String>) -> Self {
        let menu = page.locator(MENU).await;
        Self {
            page,
            url: base_url.into(),
            menu,
        }
    }

    /// Overview URL this page object navigates to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Opens the overview and waits for the first menu link to be attached.
    pub async fn navigate(&self) -> Result<()> {
        self.page.goto(&self.url).await?;
        wait::wait_for(&self.menu.first(), WaitState::Attached, DEFAULT_TIMEOUT)
            .await
            .map_err(|e| e.context(format!("playground menu at {}", self.url)))
    }

    /// Clicks the menu link for `app` and returns a fresh page object for it.
    ///
    /// Nothing is cached: every call clicks again and builds new locators.
    pub async fn select_in_menu(&self, app: App) -> Result<AppPage<P::Locator>> {
        let entry = self.menu.filter_has_text(app.label()).first();
        wait::wait_for(&entry, WaitState::Visible, DEFAULT_TIMEOUT)
            .await
            .map_err(|e| e.context(format!("menu entry '{}'", app)))?;
        entry.click(None).await?;
        tracing::info!("Opened {} from the playground menu", app);

        Ok(match app {
            App::SampleApp => AppPage::SampleApp(SampleApp::new(&self.page).await),
            App::LoadDelay => AppPage::LoadDelay(LoadDelay::new(&self.page).await),
            App::ProgressBar => AppPage::ProgressBar(ProgressBar::new(&self.page).await),
        })
    }

    /// Like [`Self::select_in_menu`], by label. Unknown labels fail before the
    /// page is touched.
    pub async fn select_in_menu_by_label(&self, label: &str) -> Result<AppPage<P::Locator>> {
        let app: App = label.parse()?;
        self.select_in_menu(app).await
    }
}
