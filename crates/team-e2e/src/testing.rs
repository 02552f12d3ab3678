// Scripted in-memory page for unit tests
//
// FakeDom keys elements by the exact selector string page objects build
// (through the shared composition helpers in `locator`). Clicks and reads can
// trigger hooks that mutate the DOM, which is enough to model login forms,
// delayed elements and a progress bar without a browser.

use crate::error::{Error, Result};
use crate::locator::{self, Locate, Surface};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

type Hook = Arc<dyn Fn(&mut DomState) + Send + Sync>;

/// One selector's worth of matching elements.
#[derive(Debug, Clone)]
pub(crate) struct FakeElement {
    pub texts: Vec<String>,
    pub attributes: HashMap<String, String>,
    pub visible: bool,
    /// Number of count/visibility lookups before the element shows up
    pub reveal_after: u32,
}

impl FakeElement {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            texts: vec![text.into()],
            attributes: HashMap::new(),
            visible: true,
            reveal_after: 0,
        }
    }

    pub fn list<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            ..Self::text("")
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn reveal_after(mut self, lookups: u32) -> Self {
        self.reveal_after = lookups;
        self
    }
}

#[derive(Default)]
pub(crate) struct DomState {
    pub elements: HashMap<String, FakeElement>,
    pub values: HashMap<String, String>,
    pub vars: HashMap<String, i64>,
    pub clicks: Vec<String>,
    pub visits: Vec<String>,
    lookups: HashMap<String, u32>,
    on_click: HashMap<String, Hook>,
    on_read: HashMap<String, Hook>,
}

impl DomState {
    /// Splits `base >> nth=N` into the base selector and index.
    fn resolve<'a>(&'a self, selector: &'a str) -> (&'a str, Option<usize>) {
        if self.elements.contains_key(selector) {
            return (selector, None);
        }
        match selector.rsplit_once(" >> nth=") {
            Some((base, index)) => (base, index.parse().ok()),
            None => (selector, None),
        }
    }

    fn lookup(&mut self, selector: &str) -> Vec<String> {
        let (base, index) = self.resolve(selector);
        let base = base.to_string();
        let lookups = self.lookups.entry(base.clone()).or_insert(0);
        *lookups += 1;
        let seen = *lookups;
        match self.elements.get(&base) {
            Some(el) if seen > el.reveal_after => match index {
                Some(i) => el.texts.get(i).cloned().into_iter().collect(),
                None => el.texts.clone(),
            },
            _ => Vec::new(),
        }
    }

    fn element(&self, selector: &str) -> Option<&FakeElement> {
        let (base, _) = self.resolve(selector);
        self.elements.get(base)
    }

    pub fn set_attribute(&mut self, selector: &str, name: &str, value: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(selector) {
            el.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn set_text(&mut self, selector: &str, text: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(selector) {
            el.texts = vec![text.into()];
        }
    }

    pub fn value(&self, selector: &str) -> String {
        self.values.get(selector).cloned().unwrap_or_default()
    }

    fn run_click_hook(&mut self, selector: &str) {
        if let Some(hook) = self.on_click.get(selector).cloned() {
            hook(self);
        }
    }

    fn run_read_hook(&mut self, selector: &str) {
        if let Some(hook) = self.on_read.get(selector).cloned() {
            hook(self);
        }
    }
}

/// Shared handle to the scripted DOM.
#[derive(Clone, Default)]
pub(crate) struct FakeDom {
    state: Arc<Mutex<DomState>>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> FakePage {
        FakePage { dom: self.clone() }
    }

    pub fn insert(&self, selector: impl Into<String>, element: FakeElement) {
        self.state.lock().elements.insert(selector.into(), element);
    }

    pub fn on_click<F>(&self, selector: impl Into<String>, hook: F)
    where
        F: Fn(&mut DomState) + Send + Sync + 'static,
    {
        self.state.lock().on_click.insert(selector.into(), Arc::new(hook));
    }

    pub fn on_read<F>(&self, selector: impl Into<String>, hook: F)
    where
        F: Fn(&mut DomState) + Send + Sync + 'static,
    {
        self.state.lock().on_read.insert(selector.into(), Arc::new(hook));
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&mut DomState) -> T) -> T {
        f(&mut *self.state.lock())
    }

    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().clicks.clone()
    }

    pub fn visits(&self) -> Vec<String> {
        self.state.lock().visits.clone()
    }
}

#[derive(Clone)]
pub(crate) struct FakePage {
    dom: FakeDom,
}

#[async_trait]
impl Surface for FakePage {
    type Locator = FakeLocator;

    async fn goto(&self, url: &str) -> Result<()> {
        self.dom.state.lock().visits.push(url.to_string());
        Ok(())
    }

    async fn locator(&self, selector: &str) -> FakeLocator {
        FakeLocator {
            dom: self.dom.clone(),
            selector: selector.to_string(),
        }
    }

    fn url(&self) -> String {
        self.dom.state.lock().visits.last().cloned().unwrap_or_default()
    }
}

#[derive(Clone)]
pub(crate) struct FakeLocator {
    dom: FakeDom,
    selector: String,
}

impl fmt::Debug for FakeLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeLocator")
            .field("selector", &self.selector)
            .finish()
    }
}

impl FakeLocator {
    fn derive(&self, selector: String) -> Self {
        Self {
            dom: self.dom.clone(),
            selector,
        }
    }

    fn missing(&self, state: &str) -> Error {
        Error::Timeout {
            selector: self.selector.clone(),
            state: state.to_string(),
            timeout: Duration::ZERO,
        }
    }

    fn single(&self, state: &mut DomState) -> Result<String> {
        let texts = state.lookup(&self.selector);
        match texts.as_slice() {
            [text] => Ok(text.clone()),
            [] => Err(self.missing("attached")),
            _ => Err(Error::Parse(format!(
                "strict mode violation: '{}' resolved to {} elements",
                self.selector,
                texts.len()
            ))),
        }
    }
}

#[async_trait]
impl Locate for FakeLocator {
    fn selector(&self) -> &str {
        &self.selector
    }

    fn locator(&self, selector: &str) -> Self {
        self.derive(locator::chain(&self.selector, selector))
    }

    fn filter_has_text(&self, text: &str) -> Self {
        self.derive(locator::has_text(&self.selector, text))
    }

    fn nth(&self, index: usize) -> Self {
        self.derive(locator::nth(&self.selector, index))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.dom.state.lock().lookup(&self.selector).len())
    }

    async fn is_visible(&self) -> Result<bool> {
        let mut state = self.dom.state.lock();
        let present = !state.lookup(&self.selector).is_empty();
        Ok(present && state.element(&self.selector).is_some_and(|el| el.visible))
    }

    async fn click(&self, _timeout: Option<Duration>) -> Result<()> {
        let mut state = self.dom.state.lock();
        if state.lookup(&self.selector).is_empty() {
            return Err(self.missing("visible"));
        }
        state.clicks.push(self.selector.clone());
        state.run_click_hook(&self.selector);
        Ok(())
    }

    async fn fill(&self, text: &str) -> Result<()> {
        let mut state = self.dom.state.lock();
        state.values.insert(self.selector.clone(), text.to_string());
        Ok(())
    }

    async fn inner_text(&self) -> Result<String> {
        let mut state = self.dom.state.lock();
        state.run_read_hook(&self.selector);
        self.single(&mut state)
    }

    async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
        let mut state = self.dom.state.lock();
        state.run_read_hook(&self.selector);
        self.single(&mut state)?;
        Ok(state
            .element(&self.selector)
            .and_then(|el| el.attributes.get(name).cloned()))
    }
}
