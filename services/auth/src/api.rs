//! The subsystem boundary.
//!
//! The UI layer calls [`AuthService`] and gets back explicit response objects
//! carrying a success flag and a message (plus a bearer token for the login
//! flows). `AuthFlowError` never crosses this boundary; internal causes are
//! logged here and collapsed into their generic messages.

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::domain::repository::Mailer;
use crate::domain::types::SessionUser;
use crate::error::AuthFlowError;
use crate::infra::store::JsonStore;
use crate::state::AuthState;
use crate::usecase::login::{PasswordLoginInput, PasswordLoginUseCase};
use crate::usecase::pin::{RequestPinUseCase, VerifyPinInput, VerifyPinUseCase};
use crate::usecase::register::{
    RegisterInput, RegisterUseCase, VerifyRegistrationInput, VerifyRegistrationUseCase,
};
use crate::usecase::sweep::SweepExpiredUseCase;
use crate::usecase::token::CheckTokenUseCase;

/// Outcome of a non-login flow.
#[derive(Debug, Clone)]
pub struct FlowResponse {
    pub success: bool,
    pub message: String,
}

/// Outcome of a login flow; carries the bearer token on success.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: Option<String>,
}

pub struct AuthService<M: Mailer + Clone> {
    state: AuthState<M>,
}

impl<M: Mailer + Clone> AuthService<M> {
    /// Wire the subsystem from configuration, opening (and if necessary
    /// creating) the data directory.
    pub fn new(config: &AuthConfig, mailer: M) -> Result<Self, AuthFlowError> {
        let store = JsonStore::open(config.data_dir.clone())?;
        Ok(Self::with_store(store, mailer, config))
    }

    pub fn with_store(store: Arc<JsonStore>, mailer: M, config: &AuthConfig) -> Self {
        Self {
            state: AuthState {
                store,
                mailer,
                jwt_secret: config.jwt_secret.clone(),
                allowed_domains: config.allowed_domains.clone(),
            },
        }
    }

    /// Submit a registration request: domain gate, pending record, emailed
    /// verification code.
    pub async fn register(&self, email: &str, password: &str) -> FlowResponse {
        if email.trim().is_empty() || password.is_empty() {
            return failure(AuthFlowError::MissingFields);
        }
        self.sweep().await;

        let usecase = RegisterUseCase {
            users: self.state.user_repo(),
            pending: self.state.pending_repo(),
            mailer: self.state.mailer.clone(),
            allowed_domains: self.state.allowed_domains.clone(),
        };
        match usecase
            .execute(RegisterInput {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .await
        {
            Ok(()) => success("Registration successful! Please check your email for a verification code."),
            Err(e) => failure(e),
        }
    }

    /// Confirm a registration with the emailed code.
    pub async fn verify_registration(&self, email: &str, code: &str) -> FlowResponse {
        if email.trim().is_empty() || code.trim().is_empty() {
            return failure(AuthFlowError::MissingFields);
        }
        self.sweep().await;

        let usecase = VerifyRegistrationUseCase {
            users: self.state.user_repo(),
            pending: self.state.pending_repo(),
        };
        match usecase
            .execute(VerifyRegistrationInput {
                email: email.to_owned(),
                code: code.trim().to_owned(),
            })
            .await
        {
            Ok(_) => success("Account verified successfully! You can now log in."),
            Err(e) => failure(e),
        }
    }

    /// Password login. Failure messages never reveal whether the email or
    /// the password was the wrong half.
    pub async fn login(&self, email: &str, password: &str) -> LoginResponse {
        if email.trim().is_empty() || password.is_empty() {
            return login_failure(AuthFlowError::MissingFields);
        }

        let usecase = PasswordLoginUseCase {
            users: self.state.user_repo(),
            jwt_secret: self.state.jwt_secret.clone(),
        };
        match usecase
            .execute(PasswordLoginInput {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .await
        {
            Ok(output) => login_success(output.token),
            Err(e) => login_failure(e),
        }
    }

    /// Request a one-time login PIN for a registered email.
    pub async fn request_login_pin(&self, email: &str) -> FlowResponse {
        if email.trim().is_empty() {
            return failure(AuthFlowError::MissingFields);
        }

        let usecase = RequestPinUseCase {
            users: self.state.user_repo(),
            pins: self.state.pin_repo(),
            mailer: self.state.mailer.clone(),
        };
        match usecase.execute(email).await {
            Ok(()) => success("PIN sent to your email address."),
            Err(e) => failure(e),
        }
    }

    /// Redeem a login PIN for a bearer token.
    pub async fn verify_login_pin(&self, email: &str, pin: &str) -> LoginResponse {
        if email.trim().is_empty() || pin.trim().is_empty() {
            return login_failure(AuthFlowError::MissingFields);
        }
        self.sweep().await;

        let usecase = VerifyPinUseCase {
            users: self.state.user_repo(),
            pins: self.state.pin_repo(),
            jwt_secret: self.state.jwt_secret.clone(),
        };
        match usecase
            .execute(VerifyPinInput {
                email: email.to_owned(),
                pin: pin.trim().to_owned(),
            })
            .await
        {
            Ok(output) => login_success(output.token),
            Err(e) => login_failure(e),
        }
    }

    /// Validate a bearer token and resolve the account it belongs to.
    ///
    /// Returns `None` for every failure mode; callers get no oracle on why a
    /// token was rejected.
    pub async fn verify_token(&self, token: &str) -> Option<SessionUser> {
        let usecase = CheckTokenUseCase {
            users: self.state.user_repo(),
            jwt_secret: self.state.jwt_secret.clone(),
        };
        usecase.execute(token).await.ok()
    }

    /// Lazy expiry sweep, run at the start of the sensitive flows. A failed
    /// sweep never blocks the flow itself.
    async fn sweep(&self) {
        let usecase = SweepExpiredUseCase {
            pending: self.state.pending_repo(),
            pins: self.state.pin_repo(),
        };
        if let Err(e) = usecase.execute().await {
            tracing::warn!(error = %e, kind = e.kind(), "expiry sweep failed");
        }
    }
}

fn success(message: &str) -> FlowResponse {
    FlowResponse {
        success: true,
        message: message.to_owned(),
    }
}

fn failure(error: AuthFlowError) -> FlowResponse {
    log_internal(&error);
    FlowResponse {
        success: false,
        message: error.to_string(),
    }
}

fn login_success(token: String) -> LoginResponse {
    LoginResponse {
        success: true,
        message: "Login successful!".to_owned(),
        token: Some(token),
    }
}

fn login_failure(error: AuthFlowError) -> LoginResponse {
    log_internal(&error);
    LoginResponse {
        success: false,
        message: error.to_string(),
        token: None,
    }
}

// Expected flow failures are not worth logging; internal errors carry an
// anyhow chain that must reach the operator's log.
fn log_internal(error: &AuthFlowError) {
    if let AuthFlowError::Internal(e) = error {
        tracing::error!(error = %e, kind = "INTERNAL", "internal error");
    }
}
