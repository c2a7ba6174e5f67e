use chrono::{Duration, Utc};

use atelier_domain::email::validate_email;
use atelier_domain::role::AccountRole;

use crate::domain::repository::AccountRepository;
use crate::domain::types::{MIN_PASSWORD_LEN, NewAccount, VALIDATION_TOKEN_TTL_HOURS};
use crate::error::AccountsServiceError;
use crate::password::hash_password;
use crate::usecase::generate_token;

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub account_id: i64,
    /// Validation token value for the activation mail, dispatched by the
    /// caller after this use case returns.
    pub token: String,
}

pub struct RegisterUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> RegisterUseCase<A> {
    pub async fn execute(
        &self,
        input: RegisterInput,
    ) -> Result<RegisterOutput, AccountsServiceError> {
        if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
            return Err(AccountsServiceError::MissingData);
        }
        if !validate_email(&input.email) {
            return Err(AccountsServiceError::InvalidEmail);
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AccountsServiceError::PasswordTooShort);
        }

        // Fast-path duplicate check; the unique index still arbitrates a
        // concurrent race inside create_with_validation_token.
        if self.accounts.find_by_email(&input.email).await?.is_some() {
            return Err(AccountsServiceError::DuplicateEmail);
        }

        let account = NewAccount {
            email: input.email,
            password_hash: hash_password(&input.password)?,
            first_name: input.first_name,
            last_name: input.last_name,
            role: AccountRole::Member,
        };
        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(VALIDATION_TOKEN_TTL_HOURS);

        let account_id = self
            .accounts
            .create_with_validation_token(&account, &token, expires_at)
            .await?;

        Ok(RegisterOutput { account_id, token })
    }
}
