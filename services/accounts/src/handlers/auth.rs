use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use atelier_domain::email::validate_email;

use crate::domain::repository::{MailKind, Mailer};
use crate::error::AccountsServiceError;
use crate::handlers::account::AccountResponse;
use crate::state::AppState;
use crate::usecase::authenticate::{AuthenticateInput, AuthenticateUseCase};
use crate::usecase::password_reset::{
    RequestPasswordResetUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AccountResponse>, AccountsServiceError> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AccountsServiceError::MissingData);
    }
    let usecase = AuthenticateUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase
        .execute(AuthenticateInput {
            email: body.email.trim().to_owned(),
            password: body.password,
        })
        .await
        // Unknown email and wrong password must be indistinguishable here,
        // or the endpoint becomes an account-enumeration oracle.
        .map_err(|e| match e {
            AccountsServiceError::AccountNotFound => AccountsServiceError::InvalidCredentials,
            other => other,
        })?;

    if !account.is_active {
        return Err(AccountsServiceError::AccountInactive);
    }

    Ok(Json(account.into()))
}

// ── POST /auth/forgot-password ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let email = body.email.trim().to_owned();
    if !validate_email(&email) {
        return Err(AccountsServiceError::InvalidEmail);
    }
    let usecase = RequestPasswordResetUseCase {
        accounts: state.account_repo(),
        tokens: state.token_repo(),
    };
    // 202 for known and unknown emails alike; only the internal log line
    // differs. Mail failure is also swallowed here for the same reason.
    if let Some(token) = usecase.execute(&email).await? {
        let delivered = state
            .mailer()
            .send(&email, MailKind::PasswordReset, &token)
            .await
            .unwrap_or(false);
        if !delivered {
            tracing::warn!(to = %email, "password reset mail was not delivered");
        }
    } else {
        tracing::debug!("password reset requested for unknown email");
    }
    Ok(StatusCode::ACCEPTED)
}

// ── POST /auth/reset-password ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    if body.token.is_empty() {
        return Err(AccountsServiceError::InvalidOrExpiredToken);
    }
    let usecase = ResetPasswordUseCase {
        tokens: state.token_repo(),
    };
    usecase
        .execute(ResetPasswordInput {
            token: body.token,
            new_password: body.password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
