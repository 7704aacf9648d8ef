// webdriver.rs
use crate::config::BrowserConfig;
use crate::scraper::browser::{Browser, ElementRef};
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// W3C identifier under which element references are serialized.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

const CHROME_ARGS: [&str; 4] = [
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--window-size=1920x1080",
];

#[derive(Debug, Deserialize)]
struct NewSession {
    #[serde(rename = "sessionId")]
    session_id: String,
}

/// Body of a failed command's `value`.
#[derive(Debug, Default, Deserialize)]
struct ErrorValue {
    #[serde(default)]
    error: String,
    message: Option<String>,
}

/// A Chrome session driven through a WebDriver endpoint (chromedriver).
pub struct WebDriverSession {
    client: Client,
    base: Url,
    session_id: Option<String>,
}

impl WebDriverSession {
    pub fn start(config: &BrowserConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let mut base = Url::parse(&config.webdriver_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut session = Self {
            client,
            base,
            session_id: None,
        };

        let value = session.command(Method::POST, "session", Some(capabilities(config)))?;
        let created: NewSession = serde_json::from_value(value)
            .map_err(|e| ScraperError::UnexpectedShape(format!("new session: {e}")))?;

        info!(session = %created.session_id, endpoint = %session.base, "🌐 Browser session started");
        session.session_id = Some(created.session_id);

        Ok(session)
    }

    fn session_path(&self, suffix: &str) -> Result<String, ScraperError> {
        let id = self
            .session_id
            .as_deref()
            .ok_or_else(|| ScraperError::WebDriver {
                code: "invalid session id".into(),
                message: "session already closed".into(),
            })?;

        Ok(if suffix.is_empty() {
            format!("session/{id}")
        } else {
            format!("session/{id}/{suffix}")
        })
    }

    /// Sends one command and unwraps the protocol's `value` envelope.
    fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ScraperError> {
        let url = self.base.join(path)?;
        debug!(%method, %url, "WebDriver command");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let resp = request.send()?;
        let status = resp.status();
        let payload: Value = resp.json()?;
        let value = unwrap_envelope(payload, status.as_u16())?;

        if status.is_success() {
            return Ok(value);
        }

        Err(classify_error(&value, status.as_u16()))
    }
}

impl Browser for WebDriverSession {
    fn goto(&mut self, url: &str) -> Result<(), ScraperError> {
        let path = self.session_path("url")?;
        self.command(Method::POST, &path, Some(json!({ "url": url })))?;
        Ok(())
    }

    fn find_elements(
        &mut self,
        scope: Option<&ElementRef>,
        css: &str,
    ) -> Result<Vec<ElementRef>, ScraperError> {
        let path = match scope {
            Some(parent) => self.session_path(&format!("element/{}/elements", parent.0))?,
            None => self.session_path("elements")?,
        };

        let value = self.command(
            Method::POST,
            &path,
            Some(json!({ "using": "css selector", "value": css })),
        )?;

        let arr = value.as_array().ok_or_else(|| {
            ScraperError::UnexpectedShape(format!("element list expected for {css}"))
        })?;

        arr.iter()
            .map(|v| {
                v[ELEMENT_KEY]
                    .as_str()
                    .map(|id| ElementRef(id.to_string()))
                    .ok_or_else(|| ScraperError::UnexpectedShape("element reference".into()))
            })
            .collect()
    }

    fn element_text(&mut self, element: &ElementRef) -> Result<String, ScraperError> {
        let path = self.session_path(&format!("element/{}/text", element.0))?;
        let value = self.command(Method::GET, &path, None)?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn is_displayed(&mut self, element: &ElementRef) -> Result<bool, ScraperError> {
        let path = self.session_path(&format!("element/{}/displayed", element.0))?;
        let value = self.command(Method::GET, &path, None)?;
        Ok(value.as_bool().unwrap_or(false))
    }

    fn execute(&mut self, script: &str, args: &[&ElementRef]) -> Result<Value, ScraperError> {
        let path = self.session_path("execute/sync")?;
        let args: Vec<Value> = args.iter().map(|el| json!({ ELEMENT_KEY: el.0 })).collect();
        self.command(
            Method::POST,
            &path,
            Some(json!({ "script": script, "args": args })),
        )
    }

    fn close(&mut self) -> Result<(), ScraperError> {
        let Ok(path) = self.session_path("") else {
            return Ok(());
        };

        let result = self.command(Method::DELETE, &path, None).map(|_| ());
        self.session_id = None;
        info!("🧹 Browser session closed");
        result
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        if self.session_id.is_some() {
            if let Err(e) = self.close() {
                warn!("Failed to close browser session on drop: {e}");
            }
        }
    }
}

fn capabilities(config: &BrowserConfig) -> Value {
    let mut args: Vec<&str> = Vec::new();
    if config.headless {
        args.push("--headless");
    }
    args.extend(CHROME_ARGS);

    let mut chrome_options = json!({ "args": args });
    if let Some(binary) = &config.chromium_binary {
        chrome_options["binary"] = json!(binary);
    }

    json!({
        "capabilities": {
            "alwaysMatch": {
                "browserName": "chrome",
                "goog:chromeOptions": chrome_options,
            }
        }
    })
}

/// Every reply is `{"value": ...}`; anything else is not a WebDriver endpoint.
fn unwrap_envelope(mut payload: Value, status: u16) -> Result<Value, ScraperError> {
    payload
        .get_mut("value")
        .map(Value::take)
        .ok_or_else(|| ScraperError::UnexpectedShape(format!("reply without value (HTTP {status})")))
}

/// Maps a W3C error payload onto the scraper's error taxonomy.
fn classify_error(value: &Value, status: u16) -> ScraperError {
    let body: ErrorValue = serde_json::from_value(value.clone()).unwrap_or_default();
    let code = if body.error.is_empty() {
        "unknown error".to_string()
    } else {
        body.error
    };
    let message = body.message.unwrap_or_else(|| format!("HTTP {status}"));

    match code.as_str() {
        "no such element" => ScraperError::NoSuchElement(message),
        "stale element reference" => ScraperError::StaleElement(message),
        "timeout" | "script timeout" => ScraperError::Timeout {
            what: message,
            secs: 0.0,
        },
        _ => ScraperError::WebDriver { code, message },
    }
}
