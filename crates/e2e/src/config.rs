//! Harness configuration
//!
//! All configuration is passed explicitly into the session manager;
//! nothing is read from process-global mutable state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment override for the application root URL.
pub const ENV_BASE_URL: &str = "FINANCEFLOW_E2E_BASE_URL";

/// Environment override for the chromedriver binary path.
pub const ENV_CHROMEDRIVER: &str = "FINANCEFLOW_E2E_CHROMEDRIVER";

/// Environment override for the Chrome/Chromium/Brave binary.
pub const ENV_BROWSER_BINARY: &str = "FINANCEFLOW_E2E_BROWSER_BINARY";

/// When set, the browser runs with a visible window.
pub const ENV_HEADFUL: &str = "FINANCEFLOW_E2E_HEADFUL";

/// Harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Root URL of the application under test
    pub base_url: String,

    /// How long an element lookup may poll before failing
    pub element_timeout: Duration,

    /// Delay between element lookup attempts
    pub poll_interval: Duration,

    /// Driver process configuration
    pub driver: DriverConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            element_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(100),
            driver: DriverConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Build a configuration from the environment, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Ok(path) = std::env::var(ENV_CHROMEDRIVER) {
            config.driver.binary_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var(ENV_BROWSER_BINARY) {
            config.driver.browser_binary = Some(PathBuf::from(path));
        }
        if std::env::var_os(ENV_HEADFUL).is_some() {
            config.driver.headless = false;
        }

        config
    }

    /// Absolute URL of a page under the application root.
    pub fn page_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// chromedriver process configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Path to the chromedriver binary
    pub binary_path: PathBuf,

    /// Port to listen on (None = find a free port)
    pub port: Option<u16>,

    /// Browser binary to launch instead of the system Chrome
    pub browser_binary: Option<PathBuf>,

    /// Run the browser without a visible window
    pub headless: bool,

    /// Timeout for the driver to accept new sessions
    pub startup_timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            binary_path: PathBuf::from("chromedriver"),
            port: None,
            browser_binary: None,
            headless: true,
            startup_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_stack() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.driver.binary_path, PathBuf::from("chromedriver"));
        assert!(config.driver.headless);
        assert!(config.driver.port.is_none());
    }

    #[test]
    fn page_url_joins_without_doubling_slashes() {
        let mut config = HarnessConfig::default();
        assert_eq!(config.page_url("/login"), "http://localhost:3000/login");

        config.base_url = "http://localhost:3000/".to_string();
        assert_eq!(
            config.page_url("/ai-insights"),
            "http://localhost:3000/ai-insights"
        );
    }

    #[test]
    fn env_overrides_take_effect() {
        std::env::set_var(ENV_BASE_URL, "http://staging:8080");
        std::env::set_var(ENV_CHROMEDRIVER, "/opt/chromedriver");
        let config = HarnessConfig::from_env();
        std::env::remove_var(ENV_BASE_URL);
        std::env::remove_var(ENV_CHROMEDRIVER);

        assert_eq!(config.base_url, "http://staging:8080");
        assert_eq!(config.driver.binary_path, PathBuf::from("/opt/chromedriver"));
    }
}
