use chrono::{Duration, Utc};

use crate::domain::repository::{AccountRepository, TokenRepository};
use crate::domain::types::{MIN_PASSWORD_LEN, RESET_TOKEN_TTL_HOURS, TokenPurpose};
use crate::error::AccountsServiceError;
use crate::password::hash_password;
use crate::usecase::generate_token;

// ── RequestPasswordReset ─────────────────────────────────────────────────────

pub struct RequestPasswordResetUseCase<A, T>
where
    A: AccountRepository,
    T: TokenRepository,
{
    pub accounts: A,
    pub tokens: T,
}

impl<A, T> RequestPasswordResetUseCase<A, T>
where
    A: AccountRepository,
    T: TokenRepository,
{
    /// Returns `None` for an unknown email with no token row created — the
    /// handler answers identically either way so the requester cannot
    /// learn whether the address is registered. For a known email, prior
    /// reset tokens are superseded atomically by the fresh one.
    pub async fn execute(&self, email: &str) -> Result<Option<String>, AccountsServiceError> {
        let Some(account) = self.accounts.find_by_email(email).await? else {
            return Ok(None);
        };

        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);
        self.tokens
            .replace_reset(account.id, &token, expires_at)
            .await?;

        Ok(Some(token))
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub token: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<T: TokenRepository> {
    pub tokens: T,
}

impl<T: TokenRepository> ResetPasswordUseCase<T> {
    /// Exchange a reset token: the owning account's credential hash is
    /// replaced and the token consumed atomically.
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AccountsServiceError> {
        if input.new_password.len() < MIN_PASSWORD_LEN {
            return Err(AccountsServiceError::PasswordTooShort);
        }

        let token = self
            .tokens
            .find_valid(&input.token, TokenPurpose::Reset)
            .await?
            .ok_or(AccountsServiceError::InvalidOrExpiredToken)?;

        let new_hash = hash_password(&input.new_password)?;
        self.tokens.consume_reset(&token, &new_hash).await
    }
}
