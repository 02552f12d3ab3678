//! team-e2e: End-to-end checks for the teams API and browser-driven sites
//!
//! The crate is the library half of an end-to-end suite. It provides:
//!
//! - [`teams`]: fetch and map the teams JSON feed, plus the relational
//!   queries the API scenarios assert on
//! - [`pages`]: page objects for the UI Testing Playground (Sample App,
//!   Load Delay, Progress Bar) and for an NHL team site roster
//! - [`wait`]: hard waits on element state and soft polling with an explicit
//!   [`PollOutcome`]
//! - [`session`]: browser lifecycle with guaranteed cleanup
//!
//! Scenarios live in `tests/`. The hermetic ones run against a local axum
//! server; the ones that need installed Playwright browsers or the public
//! sites are `#[ignore]`d and run with `cargo test -- --ignored`.
//!
//! # Example
//!
//! ```ignore
//! use team_e2e::{App, Playground, SuiteConfig, with_session};
//!
//! #[tokio::main]
//! async fn main() -> team_e2e::Result<()> {
//!     let config = SuiteConfig::from_env()?;
//!     with_session(&config, |page| async move {
//!         let playground = Playground::new(page, &config.playground_url).await;
//!         playground.navigate().await?;
//!
//!         let app = playground
//!             .select_in_menu(App::SampleApp)
//!             .await?
//!             .into_sample_app()
//!             .expect("selected the Sample App");
//!         app.await_loaded(config.load_timeout()).await?;
//!         app.fill_credentials("abcde", "pwd").await?;
//!         app.login().await?;
//!         println!("{}", app.login_status().await?);
//!         Ok(())
//!     })
//!     .await
//! }
//! ```

pub mod config;
pub mod error;
pub mod locator;
pub mod pages;
pub mod session;
pub mod teams;
pub mod wait;

#[cfg(test)]
mod testing;

pub use config::{BrowserKind, SuiteConfig};
pub use error::{Error, Result};
pub use locator::{Locate, Surface};
pub use pages::{
    App, AppPage, Language, LoadDelay, LoginState, Playground, ProgressBar, ProgressReport,
    SampleApp, TeamSite, tally_nationalities,
};
pub use session::{BrowserSession, with_session};
pub use teams::{Division, Team, fetch_teams, parse_teams};
pub use wait::{PollOutcome, WaitState};
