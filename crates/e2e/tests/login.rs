//! Acceptance scenario for the login flow
//!
//! Marked ignored because it needs chromedriver and the application
//! stack. Run with `cargo test -p financeflow-e2e -- --ignored`.

use financeflow_e2e::pages::DASHBOARD_PATH;
use financeflow_e2e::{Credentials, LoginPage, SessionManager};

/// A valid login must land on the dashboard.
#[tokio::test]
#[ignore]
async fn valid_login_redirects_to_dashboard() {
    financeflow_e2e::init_logging();

    SessionManager::from_env()
        .with_session(|session| async move {
            LoginPage::new(&session)
                .login(&Credentials::new("user1", "pass123"))
                .await?;

            session.wait_for_path(DASHBOARD_PATH).await
        })
        .await
        .expect("valid credentials should reach the dashboard");
}
