//! Session lifecycle properties
//!
//! Verifies the scoped-acquisition contract: teardown runs even when a
//! scenario fails, and consecutive scenarios never observe each other's
//! state.
//!
//! Marked ignored because they need chromedriver and the application
//! stack. Run with `cargo test -p financeflow-e2e -- --ignored`.

use financeflow_e2e::pages::ids;
use financeflow_e2e::{Credentials, E2eError, InsightsPage, LoginPage, SessionManager};

const USER: Credentials<'static> = Credentials {
    username: "user1",
    password: "pass123",
};

/// A failing scenario surfaces its own error unchanged, and the harness
/// can acquire a fresh session immediately afterwards — nothing leaked.
#[tokio::test]
#[ignore]
async fn failing_scenario_still_tears_down() {
    financeflow_e2e::init_logging();
    let manager = SessionManager::from_env();

    let outcome: Result<(), E2eError> = manager
        .with_session(|session| async move {
            session
                .expect_text(ids::STATUS, "text the application never renders")
                .await
        })
        .await;

    match outcome {
        Err(E2eError::TextMismatch { region, .. }) => assert_eq!(region, ids::STATUS),
        Err(E2eError::ElementNotFound { id, .. }) => assert_eq!(id, ids::STATUS),
        other => panic!("expected a scenario-local failure, got {other:?}"),
    }

    manager
        .with_session(|session| async move { LoginPage::new(&session).login(&USER).await })
        .await
        .expect("a fresh session must be acquirable after a failure");
}

/// Authentication from one scenario must not leak into the next: a second
/// session that never logs in is treated as tokenless.
#[tokio::test]
#[ignore]
async fn sessions_do_not_share_authentication() {
    financeflow_e2e::init_logging();
    let manager = SessionManager::from_env();

    manager
        .with_session(|session| async move { LoginPage::new(&session).login(&USER).await })
        .await
        .expect("first session should authenticate");

    manager
        .with_session(|session| async move {
            let insights = InsightsPage::new(&session);
            insights.open_direct().await?;
            insights.submit_request("123").await?;

            session
                .expect_text(ids::ERROR, "Authentication token is missing.")
                .await
        })
        .await
        .expect("second session must start unauthenticated");
}
