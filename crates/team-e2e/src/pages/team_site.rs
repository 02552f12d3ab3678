// Team site - Official NHL team website, roster scrape
//
// Reaching the roster takes four menu interactions: switch the site language,
// open a team menu from the hamburger nav, pick an entry in it, then wait for
// the roster table. The scrape reads the last cell of every roster row, which
// holds the player's nationality code.

use crate::error::Result;
use crate::locator::{Locate, Surface};
use crate::wait::{self, DEFAULT_TIMEOUT, WaitState};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

const LANGUAGE_BUTTON: &str = "#hamburger-menu button[aria-controls='language-switch']";
const LANGUAGE_NAV: &str = "nav#language-switch";
const NAV_BUTTONS: &str = "#hamburger-menu li > button";
const TEAM_MENU: &str = "nav[aria-label='Team Menu']";
const ROSTER_CELLS: &str = "table > tbody > tr > td > div > span:last-child";
const MENU_ENTRY: &str = "span";

const NAV_CLICK_TIMEOUT: Duration = Duration::from_secs(2);

/// Site language, selected by its localized label in the language switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    French,
}

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "Français",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Page object for a team's official site.
pub struct TeamSite<P: Surface> {
    page: P,
    url: String,
    language_button: P::Locator,
    language_nav: P::Locator,
    nav_buttons: P::Locator,
    team_menu: P::Locator,
    roster_cells: P::Locator,
}

impl<P: Surface> TeamSite<P> {
    pub async fn new(page: P, url: impl Into<String>) -> Self {
        Self {
            language_button: page.locator(LANGUAGE_BUTTON).await,
            language_nav: page.locator(LANGUAGE_NAV).await,
            nav_buttons: page.locator(NAV_BUTTONS).await,
            team_menu: page.locator(TEAM_MENU).await,
            roster_cells: page.locator(ROSTER_CELLS).await,
            page,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn navigate(&self) -> Result<()> {
        self.page.goto(&self.url).await
    }

    /// Opens the language switch and picks `language`.
    pub async fn change_language(&self, language: Language) -> Result<()> {
        self.language_button.click(None).await?;

        let option = self
            .language_nav
            .locator(MENU_ENTRY)
            .filter_has_text(language.label())
            .first();
        wait::wait_for(&option, WaitState::Visible, DEFAULT_TIMEOUT)
            .await
            .map_err(|e| e.context(format!("language option '{}'", language)))?;
        option.click(None).await?;

        tracing::debug!("Switched {} to {}", self.url, language);
        Ok(())
    }

    /// Opens the hamburger nav entry labelled `name`.
    pub async fn select_in_nav(&self, name: &str) -> Result<()> {
        let entry = self.nav_buttons.filter_has_text(name).first();
        wait::wait_for(&entry, WaitState::Visible, DEFAULT_TIMEOUT)
            .await
            .map_err(|e| e.context(format!("nav entry '{}'", name)))?;
        entry.click(Some(NAV_CLICK_TIMEOUT)).await
    }

    /// Picks `name` in the team menu opened by [`Self::select_in_nav`].
    pub async fn select_in_menu(&self, name: &str) -> Result<()> {
        let entry = self
            .team_menu
            .locator(MENU_ENTRY)
            .filter_has_text(name)
            .first();
        wait::wait_for(&entry, WaitState::Visible, DEFAULT_TIMEOUT)
            .await
            .map_err(|e| e.context(format!("team menu entry '{}'", name)))?;
        entry.click(None).await
    }

    /// Nationality code of every roster row, in table order.
    ///
    /// Waits for the first row; a roster that never renders is a timeout.
    /// Reads only, so calling it again on the same page gives the same list.
    pub async fn scrape_roster(&self) -> Result<Vec<String>> {
        wait::wait_for(&self.roster_cells.first(), WaitState::Visible, DEFAULT_TIMEOUT)
            .await
            .map_err(|e| e.context(format!("roster table on {}", self.page.url())))?;

        let codes: Vec<String> = self
            .roster_cells
            .all_inner_texts()
            .await?
            .into_iter()
            .map(|text| text.trim().to_string())
            .collect();
        tracing::info!("Scraped {} roster rows", codes.len());
        Ok(codes)
    }
}

/// Counts occurrences of each nationality code.
pub fn tally_nationalities(codes: &[String]) -> BTreeMap<String, usize> {
    let mut tally = BTreeMap::new();
    for code in codes {
        *tally.entry(code.clone()).or_default() += 1;
    }
    tally
}
