use std::path::PathBuf;

/// Email domains accepted for registration when `CASEDESK_ALLOWED_DOMAINS`
/// is unset: the office's own addresses.
pub const DEFAULT_ALLOWED_DOMAINS: [&str; 2] = ["@pd15.org", "@pd15.state.fl.us"];

const INSECURE_DEFAULT_SECRET: &str = "casedesk-insecure-dev-secret";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_MAIL_API_URL: &str = "https://api.brevo.com/v3/smtp/email";
const DEFAULT_MAIL_SENDER_NAME: &str = "Casedesk";

/// Auth subsystem configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing access tokens. Env var: `CASEDESK_JWT_SECRET`.
    pub jwt_secret: String,
    /// Email domain suffixes allowed to register, lowercased.
    /// Env var: `CASEDESK_ALLOWED_DOMAINS` (comma-separated).
    pub allowed_domains: Vec<String>,
    /// Directory holding the JSON store files. Env var: `CASEDESK_DATA_DIR`.
    pub data_dir: PathBuf,
    /// Outbound mail API settings.
    pub mail: MailConfig,
}

/// Transactional-mail API settings. With no API key or sender configured,
/// dispatch fails and the flows report it; nothing else breaks.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Env var: `CASEDESK_MAIL_API_URL`.
    pub api_url: String,
    /// Env var: `CASEDESK_MAIL_API_KEY`.
    pub api_key: Option<String>,
    /// From address. Env var: `CASEDESK_MAIL_SENDER`.
    pub sender: Option<String>,
    /// Display name on outgoing mail. Env var: `CASEDESK_MAIL_SENDER_NAME`.
    pub sender_name: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let jwt_secret = match non_empty(std::env::var("CASEDESK_JWT_SECRET").ok()) {
            Some(v) => v,
            None => {
                tracing::warn!(
                    "CASEDESK_JWT_SECRET is unset, falling back to the built-in development secret"
                );
                INSECURE_DEFAULT_SECRET.to_owned()
            }
        };
        let allowed_domains = std::env::var("CASEDESK_ALLOWED_DOMAINS")
            .ok()
            .map(|raw| parse_domains(&raw))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect());
        let data_dir = std::env::var("CASEDESK_DATA_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_owned());

        Self {
            jwt_secret,
            allowed_domains,
            data_dir: PathBuf::from(data_dir),
            mail: MailConfig {
                api_url: std::env::var("CASEDESK_MAIL_API_URL")
                    .ok()
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| DEFAULT_MAIL_API_URL.to_owned()),
                api_key: non_empty(std::env::var("CASEDESK_MAIL_API_KEY").ok()),
                sender: non_empty(std::env::var("CASEDESK_MAIL_SENDER").ok()),
                sender_name: std::env::var("CASEDESK_MAIL_SENDER_NAME")
                    .ok()
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| DEFAULT_MAIL_SENDER_NAME.to_owned()),
            },
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Parse a comma-separated domain list, lowercasing and dropping blanks.
fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}
