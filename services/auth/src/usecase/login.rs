use chrono::Utc;

use crate::domain::password::hash_password;
use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::AuthFlowError;
use crate::usecase::token::issue_access_token;

pub struct PasswordLoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct PasswordLoginOutput {
    pub user: User,
    pub token: String,
    pub token_expires_at: u64,
}

/// Password login: case-insensitive email lookup, exact-match digest check,
/// last-login update, token issuance.
///
/// A miss and a hash mismatch return the same error so the flow cannot be
/// used to probe which emails exist.
pub struct PasswordLoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> PasswordLoginUseCase<U> {
    pub async fn execute(
        &self,
        input: PasswordLoginInput,
    ) -> Result<PasswordLoginOutput, AuthFlowError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthFlowError::InvalidCredentials)?;

        if hash_password(&input.password, &user.salt) != user.password_hash {
            return Err(AuthFlowError::InvalidCredentials);
        }

        self.users.record_login(user.id, Utc::now()).await?;

        let (token, token_expires_at) = issue_access_token(user.id, &self.jwt_secret)?;
        Ok(PasswordLoginOutput {
            user,
            token,
            token_expires_at,
        })
    }
}
