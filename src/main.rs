use crate::config::Config;
use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod dataset;
mod domain;
mod errors;
mod pipeline;
mod scraper;
mod upload;

#[cfg(test)]
mod tests;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rental_scrape=info")),
        )
        .init();

    let config = Config::from_env()?;
    info!(sink = ?config.sink, webdriver = %config.browser.webdriver_url, "Starting daily rental scrape");

    let summary = pipeline::run(&config)?;

    for (agent, rows) in &summary.per_agent {
        info!(agent = %agent, rows, "Rows per agent");
    }
    info!(key = %summary.key, rows = summary.rows, "✅ Run complete");

    Ok(())
}
