pub mod browser;
pub mod central;
pub mod foxtons;
pub mod models;
mod scraper;
mod scraper_error;
pub mod stow_bros;
pub mod webdriver;

pub use browser::{Browser, ElementRef};
pub use models::ScrapeBatch;
pub use scraper::{with_browser, with_session, PropertyScraper};
pub use scraper_error::ScraperError;
