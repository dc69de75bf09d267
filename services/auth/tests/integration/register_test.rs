use std::collections::HashMap;

use casedesk_testing::fixture::TempDataDir;
use serde_json::Value;

use crate::helpers::{registered_service, test_service};

fn read_store(dir: &TempDataDir, file: &str) -> HashMap<String, Value> {
    match std::fs::read_to_string(dir.path().join(file)) {
        Ok(raw) => serde_json::from_str(&raw).unwrap(),
        Err(_) => HashMap::new(),
    }
}

#[tokio::test]
async fn should_reject_registration_from_outside_domain() {
    let dir = TempDataDir::new();
    let (service, mailer) = test_service(&dir);

    let response = service.register("user@gmail.com", "Passw0rd!").await;

    assert!(!response.success);
    assert!(read_store(&dir, "pending_users.json").is_empty());
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_create_one_pending_record_and_no_user_on_registration() {
    let dir = TempDataDir::new();
    let (service, mailer) = test_service(&dir);

    let response = service.register("user@pd15.org", "Passw0rd!").await;

    assert!(response.success, "{}", response.message);
    let pending = read_store(&dir, "pending_users.json");
    assert_eq!(pending.len(), 1);
    assert!(pending.contains_key("pending:user@pd15.org"));
    assert!(read_store(&dir, "users.json").is_empty());

    let code = mailer.last_code();
    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "user@pd15.org");
    assert!(sent[0].body.contains(&code));
}

#[tokio::test]
async fn should_report_dispatch_failure_while_keeping_pending_record() {
    let dir = TempDataDir::new();
    let (service, mailer) = test_service(&dir);
    *mailer.fail.lock().unwrap() = true;

    let response = service.register("user@pd15.org", "Passw0rd!").await;

    assert!(!response.success);
    assert_eq!(response.message, "failed to send email, please try again");
    // The record was committed before dispatch was attempted.
    assert_eq!(read_store(&dir, "pending_users.json").len(), 1);
}

#[tokio::test]
async fn should_accept_verification_code_exactly_once() {
    let dir = TempDataDir::new();
    let (service, mailer) = test_service(&dir);
    service.register("alice@pd15.org", "Passw0rd!").await;
    let code = mailer.last_code();

    let first = service.verify_registration("alice@pd15.org", &code).await;
    assert!(first.success, "{}", first.message);
    assert!(read_store(&dir, "pending_users.json").is_empty());
    assert_eq!(read_store(&dir, "users.json").len(), 1);

    let second = service.verify_registration("alice@pd15.org", &code).await;
    assert!(!second.success);
    assert_eq!(
        second.message,
        "no pending registration found for this email address"
    );
}

#[tokio::test]
async fn should_retain_pending_record_on_wrong_code() {
    let dir = TempDataDir::new();
    let (service, mailer) = test_service(&dir);
    service.register("alice@pd15.org", "Passw0rd!").await;
    let code = mailer.last_code();
    let wrong = if code == "111111" { "222222" } else { "111111" };

    let response = service.verify_registration("alice@pd15.org", wrong).await;

    assert!(!response.success);
    assert_eq!(response.message, "invalid verification code");
    assert_eq!(read_store(&dir, "pending_users.json").len(), 1);

    // The real code still works afterwards.
    let retry = service.verify_registration("alice@pd15.org", &code).await;
    assert!(retry.success, "{}", retry.message);
}

#[tokio::test]
async fn should_reject_registration_for_existing_email() {
    let dir = TempDataDir::new();
    let (service, _mailer) = registered_service(&dir, "alice@pd15.org", "Passw0rd!").await;

    let response = service.register("Alice@PD15.org", "Other1!").await;

    assert!(!response.success);
    assert_eq!(response.message, "email already registered");
}

#[tokio::test]
async fn should_require_email_and_password() {
    let dir = TempDataDir::new();
    let (service, _mailer) = test_service(&dir);

    let response = service.register("  ", "Passw0rd!").await;
    assert!(!response.success);
    let response = service.register("alice@pd15.org", "").await;
    assert!(!response.success);
    assert!(read_store(&dir, "pending_users.json").is_empty());
}
