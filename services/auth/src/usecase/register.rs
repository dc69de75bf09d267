use chrono::Utc;
use uuid::Uuid;

use crate::domain::password::{generate_salt, hash_password};
use crate::domain::repository::{Mailer, PendingRepository, UserRepository};
use crate::domain::types::{
    PendingRegistration, User, VERIFICATION_CODE_TTL_MS, generate_numeric_code, normalize_email,
    now_ms,
};
use crate::error::AuthFlowError;

const VERIFICATION_SUBJECT: &str = "Verify Your Casedesk Account";

fn verification_email_body(code: &str) -> String {
    format!(
        "Welcome to Casedesk!\n\n\
         Your verification code is: {code}\n\n\
         This code expires in 10 minutes. Please enter it on the verification \
         page to complete your registration.\n\n\
         If you did not request this registration, please ignore this email.\n\n\
         Best regards,\n\
         The Public Defender's Office"
    )
}

/// Return true when the email ends with one of the allow-listed suffixes.
fn domain_allowed(email: &str, allowed_domains: &[String]) -> bool {
    let email = normalize_email(email);
    allowed_domains
        .iter()
        .any(|domain| email.ends_with(&domain.to_lowercase()))
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<U, P, M>
where
    U: UserRepository,
    P: PendingRepository,
    M: Mailer,
{
    pub users: U,
    pub pending: P,
    pub mailer: M,
    pub allowed_domains: Vec<String>,
}

impl<U, P, M> RegisterUseCase<U, P, M>
where
    U: UserRepository,
    P: PendingRepository,
    M: Mailer,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<(), AuthFlowError> {
        if !domain_allowed(&input.email, &self.allowed_domains) {
            return Err(AuthFlowError::DomainNotAllowed);
        }

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AuthFlowError::EmailTaken);
        }

        let salt = generate_salt();
        let code = generate_numeric_code();
        let pending = PendingRegistration {
            email: input.email.trim().to_owned(),
            password_hash: hash_password(&input.password, &salt),
            salt,
            verification_code: code.clone(),
            expires_at: now_ms() + VERIFICATION_CODE_TTL_MS,
            created_at: Utc::now(),
        };
        self.pending.upsert(&pending).await?;

        // The pending record is already committed at this point. A failed
        // dispatch still fails the flow; the record expires on its own.
        let body = verification_email_body(&code);
        if !self
            .mailer
            .send(&pending.email, VERIFICATION_SUBJECT, &body)
            .await
        {
            return Err(AuthFlowError::DispatchFailed);
        }
        Ok(())
    }
}

// ── VerifyRegistration ───────────────────────────────────────────────────────

pub struct VerifyRegistrationInput {
    pub email: String,
    pub code: String,
}

pub struct VerifyRegistrationUseCase<U, P>
where
    U: UserRepository,
    P: PendingRepository,
{
    pub users: U,
    pub pending: P,
}

impl<U, P> VerifyRegistrationUseCase<U, P>
where
    U: UserRepository,
    P: PendingRepository,
{
    /// Promote a pending registration into a verified user.
    ///
    /// A stale record is deleted on sight; a wrong code leaves the record in
    /// place so the user can retry until it expires.
    pub async fn execute(&self, input: VerifyRegistrationInput) -> Result<User, AuthFlowError> {
        let pending = self
            .pending
            .find(&input.email)
            .await?
            .ok_or(AuthFlowError::PendingNotFound)?;

        if pending.is_expired(now_ms()) {
            self.pending.delete(&input.email).await?;
            return Err(AuthFlowError::CodeExpired);
        }

        if pending.verification_code != input.code {
            return Err(AuthFlowError::CodeMismatch);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: pending.email.clone(),
            password_hash: pending.password_hash.clone(),
            salt: pending.salt.clone(),
            verified: true,
            created_at: pending.created_at,
            last_login: Some(Utc::now()),
        };
        self.users.create(&user).await?;
        self.pending.delete(&input.email).await?;
        Ok(user)
    }
}
