//! Driver process management - spawning and readiness-checking chromedriver

use std::process::{Child, Command, Stdio};
use std::time::Duration;

use serde::Deserialize;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::DriverConfig;
use crate::error::{E2eError, E2eResult};

/// Handle to a running chromedriver process
pub struct DriverHandle {
    child: Child,
    url: String,
    port: u16,
}

/// Payload of the WebDriver `/status` endpoint
#[derive(Debug, Deserialize)]
struct DriverStatus {
    value: DriverStatusValue,
}

#[derive(Debug, Deserialize)]
struct DriverStatusValue {
    ready: bool,
}

impl DriverHandle {
    /// Spawn chromedriver and wait for it to accept new sessions
    pub async fn spawn(config: &DriverConfig) -> E2eResult<Self> {
        let port = config.port.unwrap_or_else(find_free_port);
        let url = format!("http://127.0.0.1:{}", port);

        info!("Spawning chromedriver on port {}", port);

        let child = Command::new(&config.binary_path)
            .arg(format!("--port={}", port))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                E2eError::DriverLaunch(format!(
                    "failed to spawn {}: {}",
                    config.binary_path.display(),
                    e
                ))
            })?;

        let handle = DriverHandle { child, url, port };

        handle.wait_for_ready(config.startup_timeout).await?;

        info!("chromedriver is ready at {}", handle.url);
        Ok(handle)
    }

    /// Poll the `/status` endpoint until the driver reports ready
    async fn wait_for_ready(&self, timeout: Duration) -> E2eResult<()> {
        let status_url = format!("{}/status", self.url);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout {
            attempts += 1;

            match client.get(&status_url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    let status: DriverStatus = resp.json().await?;
                    if status.value.ready {
                        return Ok(());
                    }
                }
                Ok(resp) => {
                    warn!("Status check returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for chromedriver to start...");
                    }
                    // Connection refused is expected while the driver is starting
                    if !e.is_connect() {
                        warn!("Status check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(100)).await;
        }

        Err(E2eError::DriverReadiness(attempts))
    }

    /// WebDriver endpoint served by this process
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Port the driver is listening on
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Stop the driver process
    pub fn stop(&mut self) {
        info!("Stopping chromedriver (pid: {})", self.child.id());

        // Try graceful shutdown first
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(100));
            }
        }

        // Force kill if still running
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Find a free port to bind the driver to
fn find_free_port() -> u16 {
    use std::net::TcpListener;

    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find free port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_free_port() {
        let port1 = find_free_port();
        let port2 = find_free_port();

        // Ports should be in valid range
        assert!(port1 > 1024);
        assert!(port2 > 1024);
    }

    #[test]
    fn parses_chromedriver_status_payload() {
        let body = r#"{"value":{"ready":true,"message":"ChromeDriver ready for new sessions."}}"#;
        let status: DriverStatus = serde_json::from_str(body).unwrap();
        assert!(status.value.ready);

        let body = r#"{"value":{"ready":false,"message":"starting"}}"#;
        let status: DriverStatus = serde_json::from_str(body).unwrap();
        assert!(!status.value.ready);
    }
}
