// browser.rs
use crate::scraper::ScraperError;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Opaque handle to a DOM node owned by a browser session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(pub String);

/// The slice of browser automation the fetchers rely on:
/// navigation, element lookup, and script execution.
pub trait Browser {
    fn goto(&mut self, url: &str) -> Result<(), ScraperError>;

    /// CSS lookup, either document-wide or below `scope`.
    fn find_elements(
        &mut self,
        scope: Option<&ElementRef>,
        css: &str,
    ) -> Result<Vec<ElementRef>, ScraperError>;

    /// Rendered (visible) text of a node.
    fn element_text(&mut self, element: &ElementRef) -> Result<String, ScraperError>;

    fn is_displayed(&mut self, element: &ElementRef) -> Result<bool, ScraperError>;

    /// Runs a synchronous script; elements are passed as `arguments[i]`.
    fn execute(&mut self, script: &str, args: &[&ElementRef]) -> Result<Value, ScraperError>;

    fn close(&mut self) -> Result<(), ScraperError>;
}

/// Polling wait with a fixed deadline.
#[derive(Debug, Clone, Copy)]
pub struct Wait {
    pub timeout: Duration,
    pub poll: Duration,
}

impl Wait {
    pub fn new(timeout: Duration, poll: Duration) -> Self {
        Self { timeout, poll }
    }

    /// Re-runs `probe` until it yields a value or the deadline passes.
    /// Missing or stale elements inside a probe count as "not yet".
    pub fn until<B, T, F>(&self, browser: &mut B, what: &str, mut probe: F) -> Result<T, ScraperError>
    where
        B: Browser + ?Sized,
        F: FnMut(&mut B) -> Result<Option<T>, ScraperError>,
    {
        let start = Instant::now();

        loop {
            match probe(browser) {
                Ok(Some(value)) => return Ok(value),
                Ok(None) => {}
                Err(e) if e.is_transient() => {}
                Err(e) => return Err(e),
            }

            if start.elapsed() >= self.timeout {
                return Err(ScraperError::Timeout {
                    what: what.to_string(),
                    secs: self.timeout.as_secs_f64(),
                });
            }

            std::thread::sleep(self.poll);
        }
    }

    /// First displayed element matching `css`.
    pub fn visible<B: Browser + ?Sized>(
        &self,
        browser: &mut B,
        css: &str,
    ) -> Result<ElementRef, ScraperError> {
        self.until(browser, &format!("visible {css}"), |b| {
            for element in b.find_elements(None, css)? {
                if b.is_displayed(&element)? {
                    return Ok(Some(element));
                }
            }
            Ok(None)
        })
    }

    /// All elements matching `css`, once at least one is attached.
    pub fn present_all<B: Browser + ?Sized>(
        &self,
        browser: &mut B,
        css: &str,
    ) -> Result<Vec<ElementRef>, ScraperError> {
        self.until(browser, &format!("presence of {css}"), |b| {
            let found = b.find_elements(None, css)?;
            Ok((!found.is_empty()).then_some(found))
        })
    }

    /// Resolves once `element` has been detached from the document.
    pub fn stale<B: Browser + ?Sized>(
        &self,
        browser: &mut B,
        element: &ElementRef,
    ) -> Result<(), ScraperError> {
        self.until(browser, "staleness of previous page", |b| {
            match b.is_displayed(element) {
                Ok(_) => Ok(None),
                Err(ScraperError::StaleElement(_)) | Err(ScraperError::NoSuchElement(_)) => {
                    Ok(Some(()))
                }
                Err(e) => Err(e),
            }
        })
    }
}

/// Text of every `css` match below `scope`, in document order.
pub fn collect_texts<B: Browser + ?Sized>(
    browser: &mut B,
    scope: &ElementRef,
    css: &str,
) -> Result<Vec<String>, ScraperError> {
    let elements = browser.find_elements(Some(scope), css)?;
    elements
        .iter()
        .map(|element| browser.element_text(element))
        .collect()
}

/// Splits rendered listing text into trimmed lines. Blank lines inside
/// the block stay as "" so fields keep their positions; only trailing
/// blanks are dropped.
pub fn text_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split('\n').map(|line| line.trim().to_string()).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}
