use casedesk_testing::auth::test_token;
use casedesk_testing::fixture::TempDataDir;
use uuid::Uuid;

use crate::helpers::{TEST_JWT_SECRET, registered_service};

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[tokio::test]
async fn should_resolve_fresh_login_token_to_session_user() {
    let dir = TempDataDir::new();
    let (service, _mailer) = registered_service(&dir, "alice@pd15.org", "Passw0rd!").await;
    let token = service
        .login("alice@pd15.org", "Passw0rd!")
        .await
        .token
        .unwrap();

    let session = service.verify_token(&token).await.unwrap();
    assert_eq!(session.email, "alice@pd15.org");
    assert!(session.verified);
}

#[tokio::test]
async fn should_reject_tampered_token() {
    let dir = TempDataDir::new();
    let (service, _mailer) = registered_service(&dir, "alice@pd15.org", "Passw0rd!").await;
    let token = service
        .login("alice@pd15.org", "Passw0rd!")
        .await
        .token
        .unwrap();

    let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
    let mut payload = parts[1].clone().into_bytes();
    payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
    parts[1] = String::from_utf8(payload).unwrap();
    let tampered = parts.join(".");

    assert!(service.verify_token(&tampered).await.is_none());
}

#[tokio::test]
async fn should_reject_expired_token() {
    let dir = TempDataDir::new();
    let (service, _mailer) = registered_service(&dir, "alice@pd15.org", "Passw0rd!").await;
    let session = {
        let token = service
            .login("alice@pd15.org", "Passw0rd!")
            .await
            .token
            .unwrap();
        service.verify_token(&token).await.unwrap()
    };

    let now = now_secs();
    let expired = test_token(session.id, TEST_JWT_SECRET, now - 7_200, now - 3_600);
    assert!(service.verify_token(&expired).await.is_none());
}

#[tokio::test]
async fn should_reject_token_for_unknown_subject() {
    let dir = TempDataDir::new();
    let (service, _mailer) = registered_service(&dir, "alice@pd15.org", "Passw0rd!").await;

    let now = now_secs();
    let stranger = test_token(Uuid::new_v4(), TEST_JWT_SECRET, now, now + 3_600);
    assert!(service.verify_token(&stranger).await.is_none());
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let dir = TempDataDir::new();
    let (service, _mailer) = registered_service(&dir, "alice@pd15.org", "Passw0rd!").await;
    let session = {
        let token = service
            .login("alice@pd15.org", "Passw0rd!")
            .await
            .token
            .unwrap();
        service.verify_token(&token).await.unwrap()
    };

    let now = now_secs();
    let forged = test_token(session.id, "some-other-secret", now, now + 3_600);
    assert!(service.verify_token(&forged).await.is_none());
}
