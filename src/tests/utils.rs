// src/tests/utils.rs

use crate::config::Timings;
use crate::scraper::{Browser, ElementRef, ScraperError};
use crate::upload::{ObjectSink, UploadError};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

/// Waits short enough that a missing element fails a test quickly.
pub fn fast_timings() -> Timings {
    Timings {
        central_wait: Duration::from_millis(30),
        stow_bros_wait: Duration::from_millis(30),
        foxtons_wait: Duration::from_millis(30),
        foxtons_settle: Duration::ZERO,
        poll: Duration::from_millis(1),
    }
}

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub text: String,
    pub displayed: bool,
    pub inner_text: Option<String>,
    /// Reads fail as stale, as for a node swapped out mid-render.
    pub detached: bool,
}

impl FakeElement {
    pub fn shown(text: &str) -> Self {
        Self {
            text: text.to_string(),
            displayed: true,
            inner_text: None,
            detached: false,
        }
    }

    pub fn hidden(text: &str) -> Self {
        Self {
            displayed: false,
            ..Self::shown(text)
        }
    }

    /// Rendered text is empty; only `innerText` has the content.
    pub fn inner_only(inner: &str) -> Self {
        Self {
            text: String::new(),
            displayed: true,
            inner_text: Some(inner.to_string()),
            detached: false,
        }
    }

    pub fn detached(text: &str) -> Self {
        Self {
            detached: true,
            ..Self::shown(text)
        }
    }
}

/// One rendered page: CSS selector to matching nodes.
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    elements: HashMap<String, Vec<FakeElement>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, css: &str, elements: Vec<FakeElement>) -> Self {
        self.elements.insert(css.to_string(), elements);
        self
    }

    pub fn with_texts(self, css: &str, texts: &[&str]) -> Self {
        self.with(css, texts.iter().map(|t| FakeElement::shown(t)).collect())
    }
}

/// Scripted browser. Each URL maps to a sequence of pages; a
/// `click()` script advances to the next one. Navigation or a click
/// invalidates every element handed out before it.
#[derive(Debug, Default)]
pub struct FakeBrowser {
    sites: HashMap<String, Vec<FakePage>>,
    url: Option<String>,
    page: usize,
    generation: usize,
    pub visited: Vec<String>,
    pub scripts: Vec<String>,
    pub closed: bool,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn site(mut self, url: &str, pages: Vec<FakePage>) -> Self {
        self.sites.insert(url.to_string(), pages);
        self
    }

    fn current_page(&self) -> Option<&FakePage> {
        let url = self.url.as_ref()?;
        self.sites.get(url)?.get(self.page)
    }

    fn lookup(&self, element: &ElementRef) -> Result<&FakeElement, ScraperError> {
        let mut parts = element.0.splitn(3, '|');
        let generation: usize = parts.next().and_then(|g| g.parse().ok()).unwrap_or(usize::MAX);
        let index: usize = parts.next().and_then(|i| i.parse().ok()).unwrap_or(usize::MAX);
        let css = parts.next().unwrap_or_default();

        if generation != self.generation {
            return Err(ScraperError::StaleElement(element.0.clone()));
        }

        let node = self
            .current_page()
            .and_then(|page| page.elements.get(css))
            .and_then(|nodes| nodes.get(index))
            .ok_or_else(|| ScraperError::NoSuchElement(element.0.clone()))?;

        if node.detached {
            return Err(ScraperError::StaleElement(element.0.clone()));
        }
        Ok(node)
    }
}

impl Browser for FakeBrowser {
    fn goto(&mut self, url: &str) -> Result<(), ScraperError> {
        self.visited.push(url.to_string());
        self.url = Some(url.to_string());
        self.page = 0;
        self.generation += 1;
        Ok(())
    }

    fn find_elements(
        &mut self,
        _scope: Option<&ElementRef>,
        css: &str,
    ) -> Result<Vec<ElementRef>, ScraperError> {
        let count = self
            .current_page()
            .and_then(|page| page.elements.get(css))
            .map_or(0, Vec::len);

        Ok((0..count)
            .map(|i| ElementRef(format!("{}|{i}|{css}", self.generation)))
            .collect())
    }

    fn element_text(&mut self, element: &ElementRef) -> Result<String, ScraperError> {
        Ok(self.lookup(element)?.text.clone())
    }

    fn is_displayed(&mut self, element: &ElementRef) -> Result<bool, ScraperError> {
        Ok(self.lookup(element)?.displayed)
    }

    fn execute(&mut self, script: &str, args: &[&ElementRef]) -> Result<Value, ScraperError> {
        self.scripts.push(script.to_string());

        if script.contains("click()") {
            self.page += 1;
            self.generation += 1;
            return Ok(Value::Null);
        }

        if script.contains("innerText") {
            let element = args
                .first()
                .ok_or_else(|| ScraperError::UnexpectedShape("innerText needs an element".into()))?;
            let inner = self.lookup(element)?.inner_text.clone().unwrap_or_default();
            return Ok(Value::String(inner));
        }

        Ok(Value::Null)
    }

    fn close(&mut self) -> Result<(), ScraperError> {
        self.closed = true;
        Ok(())
    }
}

/// Keeps uploaded objects in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub objects: RefCell<Vec<(String, Vec<u8>)>>,
}

impl ObjectSink for MemorySink {
    fn put(&self, key: &str, body: &[u8]) -> Result<(), UploadError> {
        self.objects
            .borrow_mut()
            .push((key.to_string(), body.to_vec()));
        Ok(())
    }

    fn describe(&self, key: &str) -> String {
        format!("memory://{key}")
    }
}

pub struct FailingSink;

impl ObjectSink for FailingSink {
    fn put(&self, key: &str, _body: &[u8]) -> Result<(), UploadError> {
        Err(UploadError::Storage {
            key: key.to_string(),
            message: "access denied".into(),
        })
    }

    fn describe(&self, key: &str) -> String {
        format!("nowhere://{key}")
    }
}
