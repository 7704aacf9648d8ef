// config.rs
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
const DEFAULT_CHROMIUM_BINARY: &str = "/usr/bin/chromium";
const DEFAULT_BUCKET: &str = "property-data-scraping";
const DEFAULT_REGION: &str = "eu-west-2";
const DEFAULT_POLL_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub browser: BrowserConfig,
    pub sink: SinkConfig,
    pub timings: Timings,
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub chromium_binary: Option<String>,
    pub headless: bool,
}

/// Where the finished artifact goes.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkConfig {
    S3 { bucket: String, region: String },
    LocalDir(PathBuf),
}

/// Per-site waits. Tests shrink these.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub central_wait: Duration,
    pub stow_bros_wait: Duration,
    pub foxtons_wait: Duration,
    pub foxtons_settle: Duration,
    pub poll: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            central_wait: Duration::from_secs(10),
            stow_bros_wait: Duration::from_secs(10),
            foxtons_wait: Duration::from_secs(30),
            foxtons_settle: Duration::from_secs(3),
            poll: Duration::from_millis(DEFAULT_POLL_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; every variable is optional.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webdriver_url =
            lookup("WEBDRIVER_URL").unwrap_or_else(|| DEFAULT_WEBDRIVER_URL.to_string());
        if url::Url::parse(&webdriver_url).is_err() {
            return Err(ConfigError::Invalid {
                key: "WEBDRIVER_URL",
                expected: "an absolute URL",
                value: webdriver_url,
            });
        }

        // An explicitly empty binary lets chromedriver pick its own.
        let chromium_binary = match lookup("CHROMIUM_BINARY") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(path),
            None => Some(DEFAULT_CHROMIUM_BINARY.to_string()),
        };

        let headless = match lookup("BROWSER_HEADLESS") {
            None => true,
            Some(raw) => parse_bool("BROWSER_HEADLESS", raw)?,
        };

        let sink = match lookup("OUTPUT_DIR").filter(|dir| !dir.trim().is_empty()) {
            Some(dir) => SinkConfig::LocalDir(PathBuf::from(dir)),
            None => SinkConfig::S3 {
                bucket: lookup("S3_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
                region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            },
        };

        let mut timings = Timings::default();
        if let Some(raw) = lookup("SCRAPE_POLL_MS") {
            let ms = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: "SCRAPE_POLL_MS",
                expected: "a whole number of milliseconds",
                value: raw.clone(),
            })?;
            timings.poll = Duration::from_millis(ms);
        }

        Ok(Self {
            browser: BrowserConfig {
                webdriver_url,
                chromium_binary,
                headless,
            },
            sink,
            timings,
        })
    }
}

fn parse_bool(key: &'static str, raw: String) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            expected: "a boolean",
            value: raw,
        }),
    }
}
