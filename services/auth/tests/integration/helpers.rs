use std::sync::{Arc, Mutex};

use casedesk_auth::api::AuthService;
use casedesk_auth::config::{AuthConfig, DEFAULT_ALLOWED_DOMAINS, MailConfig};
use casedesk_auth::domain::repository::Mailer;
use casedesk_testing::fixture::TempDataDir;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mailer that records every message instead of dispatching it. Flip `fail`
/// to simulate an outage.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    pub fail: Arc<Mutex<bool>>,
    pub sent: Arc<Mutex<Vec<SentMail>>>,
}

impl RecordingMailer {
    pub fn last_code(&self) -> String {
        let sent = self.sent.lock().unwrap();
        let body = &sent.last().expect("no mail recorded").body;
        extract_six_digits(body).expect("no 6-digit code in mail body")
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_owned(),
            subject: subject.to_owned(),
            body: body.to_owned(),
        });
        !*self.fail.lock().unwrap()
    }
}

/// First run of exactly six consecutive ASCII digits in `text`.
fn extract_six_digits(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        if bytes[start].is_ascii_digit() {
            let end = bytes[start..]
                .iter()
                .position(|b| !b.is_ascii_digit())
                .map_or(bytes.len(), |len| start + len);
            if end - start == 6 {
                return Some(text[start..end].to_owned());
            }
            start = end;
        } else {
            start += 1;
        }
    }
    None
}

pub fn test_config(dir: &TempDataDir) -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        allowed_domains: DEFAULT_ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect(),
        data_dir: dir.path().to_path_buf(),
        mail: MailConfig {
            api_url: "https://mail.invalid/send".to_owned(),
            api_key: None,
            sender: None,
            sender_name: "Casedesk".to_owned(),
        },
    }
}

/// A full service over a real JSON store in a throwaway directory, with a
/// recording mailer.
pub fn test_service(dir: &TempDataDir) -> (AuthService<RecordingMailer>, RecordingMailer) {
    let mailer = RecordingMailer::default();
    let service =
        AuthService::new(&test_config(dir), mailer.clone()).expect("failed to build service");
    (service, mailer)
}

/// Register and verify `email`, returning the service ready for login tests.
pub async fn registered_service(
    dir: &TempDataDir,
    email: &str,
    password: &str,
) -> (AuthService<RecordingMailer>, RecordingMailer) {
    let (service, mailer) = test_service(dir);
    let response = service.register(email, password).await;
    assert!(response.success, "registration failed: {}", response.message);
    let code = mailer.last_code();
    let response = service.verify_registration(email, &code).await;
    assert!(response.success, "verification failed: {}", response.message);
    (service, mailer)
}
