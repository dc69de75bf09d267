use casedesk_auth_types::token::validate_access_token;
use casedesk_testing::fixture::TempDataDir;

use crate::helpers::{TEST_JWT_SECRET, registered_service};

#[tokio::test]
async fn should_complete_register_verify_login_round_trip() {
    let dir = TempDataDir::new();
    let (service, _mailer) = registered_service(&dir, "alice@pd15.org", "Passw0rd!").await;

    let response = service.login("alice@pd15.org", "Passw0rd!").await;
    assert!(response.success, "{}", response.message);
    let token = response.token.expect("successful login carries a token");
    assert!(!token.is_empty());

    // The token's subject is Alice's internal id.
    let info = validate_access_token(&token, TEST_JWT_SECRET).unwrap();
    let session = service.verify_token(&token).await.unwrap();
    assert_eq!(session.id, info.user_id);
    assert_eq!(session.email, "alice@pd15.org");
    assert!(session.verified);
}

#[tokio::test]
async fn should_accept_login_with_differently_cased_email() {
    let dir = TempDataDir::new();
    let (service, _mailer) = registered_service(&dir, "alice@pd15.org", "Passw0rd!").await;

    let response = service.login("ALICE@pd15.org", "Passw0rd!").await;
    assert!(response.success, "{}", response.message);
}

#[tokio::test]
async fn should_not_reveal_which_credential_was_wrong() {
    let dir = TempDataDir::new();
    let (service, _mailer) = registered_service(&dir, "alice@pd15.org", "Passw0rd!").await;

    let unknown_email = service.login("mallory@pd15.org", "Passw0rd!").await;
    let wrong_password = service.login("alice@pd15.org", "nope").await;

    assert!(!unknown_email.success);
    assert!(!wrong_password.success);
    assert_eq!(unknown_email.message, wrong_password.message);
    assert!(unknown_email.token.is_none());
    assert!(wrong_password.token.is_none());
}

#[tokio::test]
async fn should_reject_login_before_verification() {
    let dir = TempDataDir::new();
    let (service, mailer) = crate::helpers::test_service(&dir);
    service.register("alice@pd15.org", "Passw0rd!").await;
    // Code delivered but never submitted; no user record exists yet.
    let _ = mailer.last_code();

    let response = service.login("alice@pd15.org", "Passw0rd!").await;
    assert!(!response.success);
    assert_eq!(response.message, "invalid email or password");
}
