use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{Mailer, PinRepository, UserRepository};
use crate::domain::types::{LOGIN_PIN_TTL_MS, LoginPin, generate_numeric_code, now_ms};
use crate::error::AuthFlowError;
use crate::usecase::token::issue_access_token;

const PIN_SUBJECT: &str = "Casedesk Login PIN";

fn pin_email_body(pin: &str) -> String {
    format!(
        "Your login PIN is: {pin}\n\n\
         This PIN expires in 5 minutes.\n\n\
         If you did not request this PIN, please ignore this email.\n\n\
         Best regards,\n\
         The Public Defender's Office"
    )
}

// ── RequestPin ───────────────────────────────────────────────────────────────

/// First half of PIN login: generate a fresh PIN for a known email and mail
/// it out. A second request overwrites the previous PIN, so at most one is
/// live per email.
pub struct RequestPinUseCase<U, P, M>
where
    U: UserRepository,
    P: PinRepository,
    M: Mailer,
{
    pub users: U,
    pub pins: P,
    pub mailer: M,
}

impl<U, P, M> RequestPinUseCase<U, P, M>
where
    U: UserRepository,
    P: PinRepository,
    M: Mailer,
{
    pub async fn execute(&self, email: &str) -> Result<(), AuthFlowError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthFlowError::EmailNotFound)?;

        let pin = LoginPin {
            email: user.email.clone(),
            pin: generate_numeric_code(),
            user_id: user.id,
            expires_at: now_ms() + LOGIN_PIN_TTL_MS,
        };
        self.pins.upsert(&pin).await?;

        let body = pin_email_body(&pin.pin);
        if !self.mailer.send(&user.email, PIN_SUBJECT, &body).await {
            return Err(AuthFlowError::DispatchFailed);
        }
        Ok(())
    }
}

// ── VerifyPin ────────────────────────────────────────────────────────────────

pub struct VerifyPinInput {
    pub email: String,
    pub pin: String,
}

#[derive(Debug)]
pub struct VerifyPinOutput {
    pub user_id: Uuid,
    pub token: String,
    pub token_expires_at: u64,
}

/// Second half of PIN login. The PIN is single-use: deleted on success,
/// deleted when observed expired, retained only on a wrong guess.
pub struct VerifyPinUseCase<U, P>
where
    U: UserRepository,
    P: PinRepository,
{
    pub users: U,
    pub pins: P,
    pub jwt_secret: String,
}

impl<U, P> VerifyPinUseCase<U, P>
where
    U: UserRepository,
    P: PinRepository,
{
    pub async fn execute(&self, input: VerifyPinInput) -> Result<VerifyPinOutput, AuthFlowError> {
        let pin = self
            .pins
            .find(&input.email)
            .await?
            .ok_or(AuthFlowError::PinNotFound)?;

        if pin.is_expired(now_ms()) {
            self.pins.delete(&input.email).await?;
            return Err(AuthFlowError::PinExpired);
        }

        if pin.pin != input.pin {
            return Err(AuthFlowError::PinMismatch);
        }

        self.users.record_login(pin.user_id, Utc::now()).await?;
        self.pins.delete(&input.email).await?;

        let (token, token_expires_at) = issue_access_token(pin.user_id, &self.jwt_secret)?;
        Ok(VerifyPinOutput {
            user_id: pin.user_id,
            token,
            token_expires_at,
        })
    }
}
