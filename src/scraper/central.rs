// central.rs
use crate::scraper::browser::{collect_texts, text_lines, Browser, Wait};
use crate::scraper::models::{CentralListing, RawListing};
use crate::scraper::ScraperError;
use tracing::info;

pub const CENTRAL_URL: &str = "https://www.central-estates.co.uk/search/2.html?n_override=0&showstc=on&showsold=on&instruction_type=Letting&minprice=&maxprice=";

const RESULTS: &str = "#search-results";
const BODY: &str = ".thumb-description-height";
const BEDS: &str = ".beds-number";
const BATHS: &str = ".bath-number";

/// Single results page; the three badge lists are zipped positionally.
pub fn fetch<B: Browser + ?Sized>(browser: &mut B, wait: Wait) -> Result<Vec<RawListing>, ScraperError> {
    info!(url = CENTRAL_URL, "🏠 Scraping Central Estates");
    browser.goto(CENTRAL_URL)?;

    let results = wait.visible(browser, RESULTS)?;
    let bodies = collect_texts(browser, &results, BODY)?;
    let beds = collect_texts(browser, &results, BEDS)?;
    let baths = collect_texts(browser, &results, BATHS)?;

    let listings: Vec<RawListing> = bodies
        .iter()
        .zip(&beds)
        .zip(&baths)
        .map(|((body, beds), baths)| RawListing::Central(parse_block(body, beds, baths)))
        .collect();

    info!(count = listings.len(), "✅ Central Estates scraped");
    Ok(listings)
}

/// Body text is "address\ncost\ndescription"; absent lines become "".
pub fn parse_block(body: &str, beds: &str, baths: &str) -> CentralListing {
    let mut lines = text_lines(body).into_iter();

    CentralListing {
        address: lines.next().unwrap_or_default(),
        cost: lines.next().unwrap_or_default(),
        description: lines.next().unwrap_or_default(),
        num_beds: beds.trim().to_string(),
        num_baths: baths.trim().to_string(),
    }
}
