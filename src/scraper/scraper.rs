// scraper.rs
use crate::config::{BrowserConfig, Timings};
use crate::scraper::browser::{Browser, Wait};
use crate::scraper::models::{RawListing, ScrapeBatch};
use crate::scraper::webdriver::WebDriverSession;
use crate::scraper::{central, foxtons, stow_bros, ScraperError};
use tracing::{error, info, warn};

/// Runs the three site fetchers, one after another, over one browser.
pub struct PropertyScraper<'a, B: Browser + ?Sized> {
    browser: &'a mut B,
    timings: Timings,
}

impl<'a, B: Browser + ?Sized> PropertyScraper<'a, B> {
    pub fn new(browser: &'a mut B, timings: Timings) -> Self {
        Self { browser, timings }
    }

    fn wait(&self, timeout: std::time::Duration) -> Wait {
        Wait::new(timeout, self.timings.poll)
    }

    pub fn scrape_central(&mut self) -> Result<Vec<RawListing>, ScraperError> {
        let wait = self.wait(self.timings.central_wait);
        central::fetch(&mut *self.browser, wait)
    }

    pub fn scrape_stow_bros(&mut self) -> Result<Vec<RawListing>, ScraperError> {
        let wait = self.wait(self.timings.stow_bros_wait);
        stow_bros::fetch(&mut *self.browser, wait)
    }

    pub fn scrape_foxtons(&mut self) -> Result<Vec<RawListing>, ScraperError> {
        let wait = self.wait(self.timings.foxtons_wait);
        foxtons::fetch(&mut *self.browser, wait, self.timings.foxtons_settle)
    }

    /// Any fatal error on one source aborts the whole batch.
    pub fn scrape_all(&mut self) -> Result<ScrapeBatch, ScraperError> {
        let batch = ScrapeBatch {
            central: self.scrape_central()?,
            stow_bros: self.scrape_stow_bros()?,
            foxtons: self.scrape_foxtons()?,
        };

        info!(
            central = batch.central.len(),
            stow_bros = batch.stow_bros.len(),
            foxtons = batch.foxtons.len(),
            "✅ Scrape complete"
        );
        Ok(batch)
    }
}

/// Runs `f` against an open browser and closes it afterwards, whatever
/// `f` returned. A failure to close is logged, never allowed to mask `f`.
pub fn with_browser<B, T, F>(browser: &mut B, f: F) -> Result<T, ScraperError>
where
    B: Browser + ?Sized,
    F: FnOnce(&mut B) -> Result<T, ScraperError>,
{
    let result = f(browser);

    if let Err(e) = browser.close() {
        warn!("Browser did not close cleanly: {e}");
    }

    if let Err(e) = &result {
        error!("Scrape failed: {e}");
    }

    result
}

/// Opens one WebDriver session for the duration of `f`.
pub fn with_session<T, F>(config: &BrowserConfig, f: F) -> Result<T, ScraperError>
where
    F: FnOnce(&mut WebDriverSession) -> Result<T, ScraperError>,
{
    let mut session = WebDriverSession::start(config)?;
    with_browser(&mut session, f)
}
