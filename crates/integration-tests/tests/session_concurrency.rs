//! Session concurrency contract: one in-flight account call per session,
//! and stale responses never overwrite a newer session.

use std::sync::Arc;

use tokio::sync::Notify;

use our_shop_client::session::{SessionError, SessionManager};
use our_shop_integration_tests::InMemoryAccountService;

fn gated_shop() -> (SessionManager<InMemoryAccountService>, Arc<Notify>) {
    let gate = Arc::new(Notify::new());
    let service = InMemoryAccountService::gated(Arc::clone(&gate));
    service.seed("user@example.com", "hunter22", false);
    (SessionManager::new(service), gate)
}

#[tokio::test]
async fn second_mutating_call_is_rejected_while_one_is_outstanding() {
    let (sessions, gate) = gated_shop();

    let first = sessions.login("user@example.com", "hunter22");
    let second = async {
        // By the time this branch runs, the first call is parked inside
        // the service.
        let err = sessions
            .register("other@example.com", "hunter22", false)
            .await
            .expect_err("second call");
        assert!(matches!(err, SessionError::PendingCall));

        gate.notify_one();
    };

    let (first_result, ()) = tokio::join!(first, second);
    first_result.expect("first call completes normally");
    assert!(sessions.is_logged_in());
}

#[tokio::test]
async fn logout_wins_over_a_late_login_response() {
    let (sessions, gate) = gated_shop();

    let login = sessions.login("user@example.com", "hunter22");
    let interrupt = async {
        sessions.logout();
        gate.notify_one();
    };

    let (login_result, ()) = tokio::join!(login, interrupt);

    // The response arrived after logout, so it was discarded.
    assert!(matches!(login_result, Err(SessionError::Stale)));
    assert!(!sessions.is_logged_in());
}

#[tokio::test]
async fn the_slot_frees_up_after_each_call() {
    let (sessions, gate) = gated_shop();

    for _ in 0..3 {
        let login = sessions.login("user@example.com", "hunter22");
        let release = async {
            gate.notify_one();
        };
        let (result, ()) = tokio::join!(login, release);
        result.expect("login");
        sessions.logout();
    }
}
