use crate::domain::repository::AccountRepository;
use crate::domain::types::Account;
use crate::error::AccountsServiceError;
use crate::password::verify_password;

pub struct AuthenticateInput {
    pub email: String,
    pub password: String,
}

pub struct AuthenticateUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> AuthenticateUseCase<A> {
    /// Verify credentials and return the full account record, including
    /// `is_active` — whether an inactive account may proceed is the
    /// caller's decision. `AccountNotFound` and `InvalidCredentials` are
    /// distinguished here for logging; the login handler collapses them
    /// so callers cannot probe which emails are registered.
    pub async fn execute(
        &self,
        input: AuthenticateInput,
    ) -> Result<Account, AccountsServiceError> {
        let account = self
            .accounts
            .find_by_email(&input.email)
            .await?
            .ok_or(AccountsServiceError::AccountNotFound)?;

        if !verify_password(&input.password, &account.password_hash) {
            return Err(AccountsServiceError::InvalidCredentials);
        }

        Ok(account)
    }
}
