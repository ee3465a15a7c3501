//! Page objects for the FinanceFlow UI
//!
//! Each accessor drives one logical page through its stable element ids,
//! keeping raw lookups out of the scenarios. Lookups are id-based, never
//! structural, so layout changes do not break them.

use tracing::info;

use crate::error::E2eResult;
use crate::session::Session;

/// Stable element ids exposed by the application under test.
pub mod ids {
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const LOGIN_BUTTON: &str = "loginButton";
    pub const AI_INSIGHTS_NAV: &str = "aiInsightsNav";
    pub const USER_ID: &str = "userId";
    pub const SUBMIT_AI_INSIGHTS: &str = "submitAiInsights";
    pub const INSIGHT: &str = "insight";
    pub const STATUS: &str = "status";
    pub const ERROR: &str = "error";
}

/// Path of the AI-insights page under the application root
pub const INSIGHTS_PATH: &str = "/ai-insights";

/// Path the application lands on after a successful login
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Username/password pair for one scenario
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> Credentials<'a> {
    pub fn new(username: &'a str, password: &'a str) -> Self {
        Self { username, password }
    }
}

/// The login page
pub struct LoginPage<'s> {
    session: &'s Session,
}

impl<'s> LoginPage<'s> {
    pub fn new(session: &'s Session) -> Self {
        Self { session }
    }

    /// Fill in the credential fields and activate the login control.
    pub async fn login(&self, credentials: &Credentials<'_>) -> E2eResult<()> {
        info!("Logging in as {}", credentials.username);

        let mut username = self.session.find_by_id(ids::USERNAME).await?;
        username.send_keys(credentials.username).await?;

        let mut password = self.session.find_by_id(ids::PASSWORD).await?;
        password.send_keys(credentials.password).await?;

        self.session.find_by_id(ids::LOGIN_BUTTON).await?.click().await?;
        Ok(())
    }
}

/// The AI-insights page
pub struct InsightsPage<'s> {
    session: &'s Session,
}

impl<'s> InsightsPage<'s> {
    pub fn new(session: &'s Session) -> Self {
        Self { session }
    }

    /// Reach the insights view through the navigation control.
    pub async fn open(&self) -> E2eResult<()> {
        self.session
            .find_by_id(ids::AI_INSIGHTS_NAV)
            .await?
            .click()
            .await?;
        Ok(())
    }

    /// Load the insights page directly, without going through the
    /// navigation (and without authenticating first).
    pub async fn open_direct(&self) -> E2eResult<()> {
        self.session.goto(INSIGHTS_PATH).await
    }

    /// Clear the user-id field, repopulate it and submit. The id is passed
    /// through verbatim; validating its format is the application's job.
    pub async fn submit_request(&self, user_id: &str) -> E2eResult<()> {
        info!("Requesting insights for user id {:?}", user_id);

        let mut field = self.session.find_by_id(ids::USER_ID).await?;
        field.clear().await?;
        field.send_keys(user_id).await?;

        self.session
            .find_by_id(ids::SUBMIT_AI_INSIGHTS)
            .await?
            .click()
            .await?;
        Ok(())
    }

    /// Text of the insight region
    pub async fn insight_text(&self) -> E2eResult<String> {
        self.session.text_of(ids::INSIGHT).await
    }

    /// Text of the status region
    pub async fn status_text(&self) -> E2eResult<String> {
        self.session.text_of(ids::STATUS).await
    }

    /// Text of the error region
    pub async fn error_text(&self) -> E2eResult<String> {
        self.session.text_of(ids::ERROR).await
    }
}
