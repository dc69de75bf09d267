/// Auth flow error variants.
///
/// `Display` carries the user-facing message the facade hands to the UI
/// layer; `kind()` gives a stable machine-readable tag for logs. Login
/// failures stay deliberately generic so the messages cannot be used to
/// enumerate accounts.
#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    #[error("registration is restricted to approved office email addresses")]
    DomainNotAllowed,
    #[error("email already registered")]
    EmailTaken,
    #[error("all fields are required")]
    MissingFields,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email not found")]
    EmailNotFound,
    #[error("no pending registration found for this email address")]
    PendingNotFound,
    #[error("verification code has expired, please register again")]
    CodeExpired,
    #[error("invalid verification code")]
    CodeMismatch,
    #[error("no PIN request found for this email address")]
    PinNotFound,
    #[error("PIN has expired, please request a new one")]
    PinExpired,
    #[error("invalid PIN")]
    PinMismatch,
    #[error("failed to send email, please try again")]
    DispatchFailed,
    #[error("invalid token")]
    InvalidToken,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthFlowError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DomainNotAllowed => "DOMAIN_NOT_ALLOWED",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::MissingFields => "MISSING_FIELDS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EmailNotFound => "EMAIL_NOT_FOUND",
            Self::PendingNotFound => "PENDING_NOT_FOUND",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::CodeMismatch => "CODE_MISMATCH",
            Self::PinNotFound => "PIN_NOT_FOUND",
            Self::PinExpired => "PIN_EXPIRED",
            Self::PinMismatch => "PIN_MISMATCH",
            Self::DispatchFailed => "DISPATCH_FAILED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}
