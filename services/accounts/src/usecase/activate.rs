use crate::domain::repository::TokenRepository;
use crate::domain::types::TokenPurpose;
use crate::error::AccountsServiceError;

pub struct ActivateAccountUseCase<T: TokenRepository> {
    pub tokens: T,
}

impl<T: TokenRepository> ActivateAccountUseCase<T> {
    /// Exchange a validation token: the owning account becomes active and
    /// the token is consumed atomically. Absent or expired tokens fail
    /// without any mutation, so a retry after a transient store error
    /// still finds the token in place.
    pub async fn execute(&self, token_value: &str) -> Result<(), AccountsServiceError> {
        let token = self
            .tokens
            .find_valid(token_value, TokenPurpose::Validation)
            .await?
            .ok_or(AccountsServiceError::InvalidOrExpiredToken)?;

        self.tokens.consume_validation(&token).await
    }
}
