//! Browser session lifecycle and element access
//!
//! One [`Session`] owns one chromedriver process and one WebDriver
//! session. Sessions are created per scenario and never reused, so no
//! cookie or storage state can leak between scenarios.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::{DriverConfig, HarnessConfig};
use crate::driver::DriverHandle;
use crate::error::{E2eError, E2eResult};

/// Path of the login page under the application root
pub const LOGIN_PATH: &str = "/login";

/// Creates and tears down one browser session per scenario
pub struct SessionManager {
    config: HarnessConfig,
}

impl SessionManager {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Manager configured from the `FINANCEFLOW_E2E_*` environment
    pub fn from_env() -> Self {
        Self::new(HarnessConfig::from_env())
    }

    /// Launch a driver, open a fresh session and land on the login page
    pub async fn acquire(&self) -> E2eResult<Session> {
        let driver = DriverHandle::spawn(&self.config.driver).await?;

        let client = ClientBuilder::native()
            .capabilities(chrome_capabilities(&self.config.driver))
            .connect(driver.url())
            .await?;

        let session = Session {
            client,
            driver: Arc::new(driver),
            config: self.config.clone(),
        };

        session.client.maximize_window().await?;
        session.goto(LOGIN_PATH).await?;

        info!("Session ready at {}", session.config.page_url(LOGIN_PATH));
        Ok(session)
    }

    /// Run a scenario against a fresh session, tearing the session down on
    /// every exit path. The scenario's own outcome is returned unchanged.
    pub async fn with_session<T, F, Fut>(&self, scenario: F) -> E2eResult<T>
    where
        F: FnOnce(Session) -> Fut,
        Fut: Future<Output = E2eResult<T>>,
    {
        let session = self.acquire().await?;
        let outcome = scenario(session.clone()).await;
        session.close().await;
        outcome
    }
}

/// Chrome capability set for a driver configuration
fn chrome_capabilities(config: &DriverConfig) -> serde_json::Map<String, serde_json::Value> {
    let mut args: Vec<String> = Vec::new();
    if config.headless {
        args.push("--headless=new".to_string());
        args.push("--disable-gpu".to_string());
    }

    let mut options = serde_json::Map::new();
    options.insert("args".to_string(), json!(args));
    if let Some(binary) = &config.browser_binary {
        options.insert("binary".to_string(), json!(binary));
    }

    let mut caps = serde_json::Map::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        serde_json::Value::Object(options),
    );
    caps
}

/// One live browser session bound to a single scenario
#[derive(Clone)]
pub struct Session {
    client: Client,
    driver: Arc<DriverHandle>,
    config: HarnessConfig,
}

impl Session {
    /// Navigate to a path under the application root
    pub async fn goto(&self, path: &str) -> E2eResult<()> {
        let url = self.config.page_url(path);
        debug!("Navigating to {}", url);
        self.client.goto(&url).await?;
        Ok(())
    }

    /// Current URL of the session
    pub async fn current_url(&self) -> E2eResult<url::Url> {
        Ok(self.client.current_url().await?)
    }

    /// Port of the chromedriver process backing this session
    pub fn driver_port(&self) -> u16 {
        self.driver.port()
    }

    /// Drop all cookies, leaving the session unauthenticated
    pub async fn clear_cookies(&self) -> E2eResult<()> {
        debug!("Deleting all cookies");
        self.client.delete_all_cookies().await?;
        Ok(())
    }

    /// Locate an element by its stable id, polling until the configured
    /// element timeout elapses.
    pub async fn find_by_id(&self, id: &str) -> E2eResult<Element> {
        self.client
            .wait()
            .at_most(self.config.element_timeout)
            .every(self.config.poll_interval)
            .for_element(Locator::Id(id))
            .await
            .map_err(|e| match e {
                CmdError::WaitTimeout => E2eError::ElementNotFound {
                    id: id.to_string(),
                    waited_ms: self.config.element_timeout.as_millis() as u64,
                },
                other => other.into(),
            })
    }

    /// Rendered text of a named region
    pub async fn text_of(&self, id: &str) -> E2eResult<String> {
        let element = self.find_by_id(id).await?;
        Ok(element.text().await?)
    }

    /// Assert the rendered text of a region, reporting both values on
    /// mismatch.
    pub async fn expect_text(&self, id: &str, expected: &str) -> E2eResult<()> {
        let actual = self.text_of(id).await?;
        if actual != expected {
            return Err(E2eError::TextMismatch {
                region: id.to_string(),
                expected: expected.to_string(),
                actual,
            });
        }
        debug!("`{}` shows {:?}", id, expected);
        Ok(())
    }

    /// Wait for the browser to land on the given path, with the same
    /// bounded polling an element lookup gets.
    pub async fn wait_for_path(&self, path: &str) -> E2eResult<()> {
        let deadline = Instant::now() + self.config.element_timeout;

        loop {
            let url = self.client.current_url().await?;
            if url.path() == path {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(E2eError::Navigation {
                    expected: path.to_string(),
                    actual: url.path().to_string(),
                    waited_ms: self.config.element_timeout.as_millis() as u64,
                });
            }
            sleep(self.config.poll_interval).await;
        }
    }

    /// Delete the WebDriver session and stop the driver process. A failed
    /// delete is logged rather than masking the scenario's own outcome;
    /// the driver process is killed when the last handle drops regardless.
    pub async fn close(self) {
        if let Err(e) = self.client.close().await {
            warn!("Session close failed: {}", e);
        }
    }
}
