//! Account lifecycle: register, conflict, profile update, delete.

use our_shop_client::account::{AccountApi, AccountError};
use our_shop_client::session::{SessionError, SessionManager, ValidationError};
use our_shop_integration_tests::InMemoryAccountService;

#[tokio::test]
async fn register_then_login_roundtrip() {
    let service = InMemoryAccountService::new();
    let sessions = SessionManager::new(service.clone());

    let session = sessions
        .register("new@example.com", "hunter22", false)
        .await
        .expect("register");
    assert_eq!(session.email.as_str(), "new@example.com");
    assert!(!session.is_admin);
    assert_eq!(service.account_count(), 1);

    // Register logs the user in.
    assert!(sessions.is_logged_in());

    sessions.logout();
    let session = sessions
        .login("new@example.com", "hunter22")
        .await
        .expect("login");
    assert_eq!(session.email.as_str(), "new@example.com");
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let service = InMemoryAccountService::new();
    service.seed("taken@example.com", "hunter22", false);
    let sessions = SessionManager::new(service.clone());

    let err = sessions
        .register("taken@example.com", "another22", false)
        .await
        .expect_err("duplicate register");

    assert!(matches!(
        err,
        SessionError::Account(AccountError::Conflict(_))
    ));
    assert_eq!(service.account_count(), 1);
    assert!(!sessions.is_logged_in());
}

#[tokio::test]
async fn login_with_unknown_email_is_no_match() {
    let service = InMemoryAccountService::new();
    let sessions = SessionManager::new(service);

    let err = sessions
        .login("nobody@example.com", "hunter22")
        .await
        .expect_err("unknown login");

    assert!(matches!(err, SessionError::Account(AccountError::NoMatch)));
    assert!(!sessions.is_logged_in());
}

#[tokio::test]
async fn login_accepts_an_existing_short_password() {
    // The length rule only applies when a password is created; accounts
    // seeded elsewhere can carry shorter ones and must still log in.
    let service = InMemoryAccountService::new();
    service.seed("user@example.com", "admin", false);
    let sessions = SessionManager::new(service);

    let session = sessions
        .login("user@example.com", "admin")
        .await
        .expect("login with short stored password");

    assert_eq!(session.email.as_str(), "user@example.com");
    assert!(sessions.is_logged_in());
}

#[tokio::test]
async fn wrong_password_is_no_match() {
    let service = InMemoryAccountService::new();
    service.seed("user@example.com", "hunter22", false);
    let sessions = SessionManager::new(service);

    let err = sessions
        .login("user@example.com", "wrong-password")
        .await
        .expect_err("wrong password");

    assert!(matches!(err, SessionError::Account(AccountError::NoMatch)));
}

#[tokio::test]
async fn profile_update_changes_stored_email_and_password() {
    let service = InMemoryAccountService::new();
    let id = service.seed("user@example.com", "hunter22", false);
    let sessions = SessionManager::new(service.clone());

    sessions
        .login("user@example.com", "hunter22")
        .await
        .expect("login");
    sessions
        .update_profile("renamed@example.com", Some(("newpass1", "newpass1")))
        .await
        .expect("update");

    // The live session reflects the new email.
    assert_eq!(
        sessions.current().expect("session").email.as_str(),
        "renamed@example.com"
    );

    // The stored account does too, and the old credentials are dead.
    let stored = service.get_user(id).await.expect("stored account");
    assert_eq!(stored.email.as_str(), "renamed@example.com");

    sessions.logout();
    assert!(sessions.login("renamed@example.com", "newpass1").await.is_ok());
}

#[tokio::test]
async fn profile_update_rejects_bad_input_before_the_service_sees_it() {
    let service = InMemoryAccountService::new();
    service.seed("user@example.com", "hunter22", false);
    let sessions = SessionManager::new(service.clone());

    sessions
        .login("user@example.com", "hunter22")
        .await
        .expect("login");

    let err = sessions
        .update_profile("not-an-email", None)
        .await
        .expect_err("bad email");
    assert!(matches!(
        err,
        SessionError::Validation(ValidationError::Email(_))
    ));

    let err = sessions
        .update_profile("user@example.com", Some(("newpass1", "different")))
        .await
        .expect_err("mismatched confirmation");
    assert!(matches!(
        err,
        SessionError::Validation(ValidationError::PasswordMismatch)
    ));

    // Neither attempt reached the store.
    let stored = service.list_users().await.expect("list");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email.as_str(), "user@example.com");
}

#[tokio::test]
async fn delete_profile_removes_account_and_clears_session() {
    let service = InMemoryAccountService::new();
    service.seed("user@example.com", "hunter22", false);
    let sessions = SessionManager::new(service.clone());

    sessions
        .login("user@example.com", "hunter22")
        .await
        .expect("login");
    sessions.delete_profile().await.expect("delete");

    assert!(!sessions.is_logged_in());
    assert_eq!(service.account_count(), 0);

    // The account really is gone.
    let err = sessions
        .login("user@example.com", "hunter22")
        .await
        .expect_err("login after delete");
    assert!(matches!(err, SessionError::Account(AccountError::NoMatch)));
}
