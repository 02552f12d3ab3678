// Locator - Capability traits over the browser automation layer
//
// Page objects never talk to playwright-rs directly. They are generic over a
// `Surface` (one open page) and its `Locate` handles, so the same page object
// code drives a real browser and the scripted DOM used by unit tests.
//
// Architecture:
// - Surface: navigation + locator factory for a single page
// - Locate: lazy element query, re-resolved on every interaction
// - Selector composition is shared by every implementation so that chained
//   and filtered locators produce identical selector strings
//
// See: https://playwright.dev/docs/locators

use crate::error::Result;
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

/// Joins a parent selector and a child selector into a descendant query.
pub fn chain(parent: &str, child: &str) -> String {
    format!("{} >> {}", parent, child)
}

/// Narrows a selector to elements containing `text` (case-insensitive substring).
///
/// Produces the same selector Playwright's `locator.filter({ hasText })` sends.
pub fn has_text(selector: &str, text: &str) -> String {
    chain(selector, &has_text_engine(text))
}

/// Narrows a selector to its `index`-th match (0-based).
pub fn nth(selector: &str, index: usize) -> String {
    chain(selector, &format!("nth={}", index))
}

fn has_text_engine(text: &str) -> String {
    // Value's Display writes a JSON string literal, escapes included
    format!("internal:has-text={}i", serde_json::Value::from(text))
}

/// An open page that page objects navigate and query.
#[async_trait]
pub trait Surface: Clone + Send + Sync {
    /// Locator handle type produced by this page
    type Locator: Locate;

    /// Navigates the page to `url` and waits for the load event.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Creates a lazy locator for `selector`.
    async fn locator(&self, selector: &str) -> Self::Locator;

    /// Current URL of the page.
    fn url(&self) -> String;
}

/// A lazy reference to zero or more elements of a live page.
///
/// Nothing is resolved until a query or action runs, and every call
/// re-resolves the selector against the current DOM.
#[async_trait]
pub trait Locate: Clone + Send + Sync + Debug {
    /// Selector string this handle resolves.
    fn selector(&self) -> &str;

    /// Sub-locator within this locator's subtree.
    fn locator(&self, selector: &str) -> Self;

    /// Keeps only matches whose text contains `text`.
    fn filter_has_text(&self, text: &str) -> Self;

    /// The `index`-th match.
    fn nth(&self, index: usize) -> Self;

    /// The first match.
    fn first(&self) -> Self {
        self.nth(0)
    }

    /// Number of elements currently matching.
    async fn count(&self) -> Result<usize>;

    /// Whether the (single) match is attached and visible.
    async fn is_visible(&self) -> Result<bool>;

    /// Clicks the match, waiting at most `timeout` for it to become actionable.
    async fn click(&self, timeout: Option<Duration>) -> Result<()>;

    /// Replaces the value of an input.
    async fn fill(&self, text: &str) -> Result<()>;

    /// Rendered text of the match.
    async fn inner_text(&self) -> Result<String>;

    /// Value of attribute `name`, `None` when absent.
    async fn get_attribute(&self, name: &str) -> Result<Option<String>>;

    /// Rendered text of every match, in document order.
    async fn all_inner_texts(&self) -> Result<Vec<String>> {
        let count = self.count().await?;
        let mut texts = Vec::with_capacity(count);
        for index in 0..count {
            texts.push(self.nth(index).inner_text().await?);
        }
        Ok(texts)
    }
}

#[async_trait]
impl Surface for playwright_rs::Page {
    type Locator = playwright_rs::Locator;

    async fn goto(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        playwright_rs::Page::goto(self, url, None).await?;
        Ok(())
    }

    async fn locator(&self, selector: &str) -> Self::Locator {
        playwright_rs::Page::locator(self, selector).await
    }

    fn url(&self) -> String {
        playwright_rs::Page::url(self)
    }
}

#[async_trait]
impl Locate for playwright_rs::Locator {
    fn selector(&self) -> &str {
        playwright_rs::Locator::selector(self)
    }

    fn locator(&self, selector: &str) -> Self {
        playwright_rs::Locator::locator(self, selector)
    }

    fn filter_has_text(&self, text: &str) -> Self {
        playwright_rs::Locator::locator(self, &has_text_engine(text))
    }

    fn nth(&self, index: usize) -> Self {
        playwright_rs::Locator::nth(self, i32::try_from(index).unwrap_or(i32::MAX))
    }

    async fn count(&self) -> Result<usize> {
        Ok(playwright_rs::Locator::count(self).await?)
    }

    async fn is_visible(&self) -> Result<bool> {
        Ok(playwright_rs::Locator::is_visible(self).await?)
    }

    async fn click(&self, timeout: Option<Duration>) -> Result<()> {
        let options = timeout.map(|t| playwright_rs::ClickOptions {
            timeout: Some(t.as_millis() as f64),
            ..Default::default()
        });
        playwright_rs::Locator::click(self, options).await?;
        Ok(())
    }

    async fn fill(&self, text: &str) -> Result<()> {
        playwright_rs::Locator::fill(self, text, None).await?;
        Ok(())
    }

    async fn inner_text(&self) -> Result<String> {
        Ok(playwright_rs::Locator::inner_text(self).await?)
    }

    async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(playwright_rs::Locator::get_attribute(self, name).await?)
    }
}
