//! FinanceFlow acceptance-test harness
//!
//! This crate provides a Rust-controlled page-interaction harness that:
//! - Spawns chromedriver as a subprocess, one per scenario
//! - Drives the FinanceFlow web UI over the WebDriver protocol
//! - Exposes page objects for the login and AI-insights pages
//! - Asserts on rendered page text with diagnostic failures
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                Acceptance scenarios (tests/)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SessionManager                                             │
//! │    ├── acquire() -> Session      (driver + login page)      │
//! │    └── with_session(|s| ..)      (teardown on all paths)    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Page objects                                               │
//! │    ├── LoginPage::login(credentials)                        │
//! │    └── InsightsPage::{open, open_direct, submit_request}    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Session                                                    │
//! │    ├── find_by_id               (bounded polling)           │
//! │    ├── text_of / expect_text                                │
//! │    └── close()                  (session + driver process)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod pages;
pub mod session;

pub use config::{DriverConfig, HarnessConfig};
pub use error::{E2eError, E2eResult};
pub use pages::{Credentials, InsightsPage, LoginPage};
pub use session::{Session, SessionManager};

use tracing_subscriber::EnvFilter;

/// Initialize logging for scenario binaries. Safe to call more than once;
/// later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
