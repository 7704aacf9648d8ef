// foxtons.rs
use crate::scraper::browser::{text_lines, Browser, Wait};
use crate::scraper::models::{FoxtonsListing, RawListing};
use crate::scraper::ScraperError;
use std::time::Duration;
use tracing::{debug, info};

/// Category pages, each queried separately.
pub const FOXTONS_URLS: [&str; 3] = [
    "https://www.foxtons.co.uk/properties-to-rent/forest-gate-e7",
    "https://www.foxtons.co.uk/properties-to-rent/leyton-e10",
    "https://www.foxtons.co.uk/properties-to-rent/walthamstow-e17",
];

const HOLDER: &str = ".property_holder";
const SCROLL: &str = "window.scrollTo(0, document.body.scrollHeight);";
const INNER_TEXT: &str = "return arguments[0].innerText;";

/// Promotional first lines that push the address down by one.
const BADGES: [&str; 4] = [
    "Zero Deposit Scheme",
    "Recently let",
    "Recommended property",
    "Recently reduced in price",
];

pub fn fetch<B: Browser + ?Sized>(
    browser: &mut B,
    wait: Wait,
    settle: Duration,
) -> Result<Vec<RawListing>, ScraperError> {
    let mut blocks: Vec<Vec<String>> = Vec::new();

    for url in FOXTONS_URLS {
        info!(url, "🏠 Scraping Foxtons");
        browser.goto(url)?;
        browser.execute(SCROLL, &[])?;
        std::thread::sleep(settle);

        for holder in wait.present_all(browser, HOLDER)? {
            if !browser.is_displayed(&holder)? {
                debug!("Skipping hidden property holder");
                continue;
            }

            let mut text = browser.element_text(&holder)?.trim().to_string();
            if text.is_empty() {
                let inner = browser.execute(INNER_TEXT, &[&holder])?;
                text = inner.as_str().unwrap_or_default().trim().to_string();
            }

            if text.is_empty() {
                debug!("Property holder has no visible text");
                continue;
            }

            blocks.push(text_lines(&text));
        }
    }

    let scraped = blocks.len();
    let listings: Vec<RawListing> = blocks
        .into_iter()
        .filter_map(parse_block)
        .map(RawListing::Foxtons)
        .collect();

    info!(count = listings.len(), discarded = scraped - listings.len(), "✅ Foxtons scraped");
    Ok(listings)
}

/// Keeps four-line property blocks and drops any leading badge.
pub fn parse_block(lines: Vec<String>) -> Option<FoxtonsListing> {
    if lines.first()?.starts_with("New properties") || lines.len() != 4 {
        return None;
    }

    let fields = if BADGES.contains(&lines[0].as_str()) {
        &lines[1..]
    } else {
        &lines[..]
    };

    Some(FoxtonsListing {
        address: fields[0].clone(),
        cost: fields[1].clone(),
        num_beds: fields[2].clone(),
    })
}
