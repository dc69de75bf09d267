//! Outbound mail over an HTTP transactional-mail API.

use serde::Serialize;

use crate::config::MailConfig;
use crate::domain::repository::Mailer;

#[derive(Debug, Serialize)]
struct EmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailBody {
    sender: EmailAddress,
    to: Vec<EmailAddress>,
    subject: String,
    text_content: String,
}

/// Sends mail through the configured HTTP API (api-key header, JSON body).
///
/// With no API key or sender configured, every send fails after logging a
/// pointer at the missing settings; the calling flow surfaces the failure as
/// its own dispatch error.
#[derive(Clone)]
pub struct HttpApiMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpApiMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl Mailer for HttpApiMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool {
        let (Some(api_key), Some(sender)) = (&self.config.api_key, &self.config.sender) else {
            tracing::error!(
                "mail service not configured; set CASEDESK_MAIL_API_KEY and CASEDESK_MAIL_SENDER"
            );
            return false;
        };

        let payload = SendEmailBody {
            sender: EmailAddress {
                email: sender.clone(),
                name: Some(self.config.sender_name.clone()),
            },
            to: vec![EmailAddress {
                email: to.to_owned(),
                name: None,
            }],
            subject: subject.to_owned(),
            text_content: body.to_owned(),
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("api-key", api_key)
            .header("accept", "application/json")
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                tracing::error!(status = %resp.status(), to, "mail API rejected message");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, to, "mail API request failed");
                false
            }
        }
    }
}
