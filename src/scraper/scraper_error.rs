use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Element not found: {0}")]
    NoSuchElement(String),

    #[error("Stale element reference: {0}")]
    StaleElement(String),

    #[error("Timed out after {secs:.1}s waiting for {what}")]
    Timeout { what: String, secs: f64 },

    #[error("WebDriver error ({code}): {message}")]
    WebDriver { code: String, message: String },

    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
}

impl ScraperError {
    /// Errors a wait probe treats as "condition not met yet".
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ScraperError::NoSuchElement(_) | ScraperError::StaleElement(_)
        )
    }

    /// Errors that end Stow Bros pagination instead of failing the run.
    pub fn ends_pagination(&self) -> bool {
        self.is_transient() || matches!(self, ScraperError::Timeout { .. })
    }
}

impl From<reqwest::Error> for ScraperError {
    fn from(err: reqwest::Error) -> Self {
        ScraperError::Network(err.to_string())
    }
}

impl From<url::ParseError> for ScraperError {
    fn from(err: url::ParseError) -> Self {
        ScraperError::Network(format!("invalid WebDriver URL: {err}"))
    }
}
