// errors.rs
use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::scraper::ScraperError;
use crate::upload::UploadError;
use thiserror::Error;

/// Anything that aborts a run. There is no partial success.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scrape failed: {0}")]
    Scrape(#[from] ScraperError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),
}
