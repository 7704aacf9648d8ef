// stow_bros.rs
use crate::scraper::browser::{collect_texts, text_lines, Browser, ElementRef, Wait};
use crate::scraper::models::{RawListing, StowBrosListing};
use crate::scraper::ScraperError;
use tracing::{debug, info};

pub const STOW_BROS_URL: &str =
    "https://www.stowbrothers.com/property-search/?orderby=price-asc&department=residential-lettings";

const CONTENT: &str = "#content";
const CARD: &str = ".mt-4.cols-container.f-body";
const NEXT: &str = "a.next.page-numbers";
const CLICK: &str = "arguments[0].click();";

/// Walks the paginated results by clicking "next" until it disappears.
///
/// Only the first page's container is required. After that, a missing
/// element, a stale read, or a timeout just means there are no more pages.
pub fn fetch<B: Browser + ?Sized>(browser: &mut B, wait: Wait) -> Result<Vec<RawListing>, ScraperError> {
    info!(url = STOW_BROS_URL, "🏠 Scraping Stow Brothers");
    browser.goto(STOW_BROS_URL)?;

    let mut content = wait.visible(browser, CONTENT)?;
    let mut cards: Vec<String> = Vec::new();
    let mut page = 1;

    loop {
        let step = match collect_texts(browser, &content, CARD) {
            Ok(texts) => {
                debug!(page, cards = texts.len(), "📄 Page read");
                cards.extend(texts);
                next_page(browser, wait, &content)
            }
            Err(e) => Err(e),
        };

        match step {
            Ok(Some(next_content)) => {
                content = next_content;
                page += 1;
            }
            Ok(None) => {
                info!(page, "🏁 No more pages");
                break;
            }
            Err(e) if e.ends_pagination() => {
                info!(page, "🏁 Pagination ended: {e}");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    let listings: Vec<RawListing> = cards
        .iter()
        .filter_map(|text| parse_card(text))
        .map(RawListing::StowBros)
        .collect();

    info!(count = listings.len(), pages = page, "✅ Stow Brothers scraped");
    Ok(listings)
}

/// Clicks "next" and waits for the old container to be replaced.
fn next_page<B: Browser + ?Sized>(
    browser: &mut B,
    wait: Wait,
    content: &ElementRef,
) -> Result<Option<ElementRef>, ScraperError> {
    let Some(next) = browser.find_elements(None, NEXT)?.into_iter().next() else {
        return Ok(None);
    };

    browser.execute(CLICK, &[&next])?;
    wait.stale(browser, content)?;
    wait.visible(browser, CONTENT).map(Some)
}

/// Card text is "address\nprice[\ndescription]".
pub fn parse_card(text: &str) -> Option<StowBrosListing> {
    let mut lines = text_lines(text).into_iter();
    let address = lines.next()?;

    Some(StowBrosListing {
        address,
        price: lines.next().unwrap_or_default(),
        description: lines.next(),
    })
}
