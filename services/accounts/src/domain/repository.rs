#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use atelier_domain::pagination::PageRequest;

use crate::domain::types::{
    Account, AccountChanges, AccountSortBy, AccountToken, NewAccount, TokenPurpose,
};
use crate::error::AccountsServiceError;

/// Repository for account records.
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AccountsServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsServiceError>;

    /// Insert an inactive account and its `validation` token in one
    /// transaction; returns the store-assigned account id. A unique-index
    /// violation on email maps to `DuplicateEmail`. On any failure neither
    /// row is left behind.
    async fn create_with_validation_token(
        &self,
        account: &NewAccount,
        token_value: &str,
        token_expires_at: DateTime<Utc>,
    ) -> Result<i64, AccountsServiceError>;

    /// List accounts (admin backoffice).
    async fn list(
        &self,
        sort_by: AccountSortBy,
        page: PageRequest,
    ) -> Result<Vec<Account>, AccountsServiceError>;

    /// Apply a partial update (admin backoffice). `updated_at` is bumped.
    async fn update(
        &self,
        id: i64,
        changes: &AccountChanges,
    ) -> Result<(), AccountsServiceError>;

    /// Delete an account. Returns `true` if a row was deleted.
    async fn delete(&self, id: i64) -> Result<bool, AccountsServiceError>;
}

/// Repository for single-use account tokens.
pub trait TokenRepository: Send + Sync {
    /// Find a live token by exact value and purpose (present and unexpired).
    async fn find_valid(
        &self,
        value: &str,
        purpose: TokenPurpose,
    ) -> Result<Option<AccountToken>, AccountsServiceError>;

    /// Exchange a `validation` token: set the owning account active and
    /// delete the token, both in one transaction. On failure the account
    /// stays inactive and the token stays present.
    async fn consume_validation(&self, token: &AccountToken)
    -> Result<(), AccountsServiceError>;

    /// Delete all prior `reset` tokens for the account and insert a fresh
    /// one in one transaction, so at most one reset token is outstanding.
    async fn replace_reset(
        &self,
        account_id: i64,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountsServiceError>;

    /// Exchange a `reset` token: store the new credential hash and delete
    /// the token, both in one transaction.
    async fn consume_reset(
        &self,
        token: &AccountToken,
        new_password_hash: &str,
    ) -> Result<(), AccountsServiceError>;
}

/// Template kind for outbound account mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailKind {
    Validation,
    PasswordReset,
}

impl MailKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::PasswordReset => "password-reset",
        }
    }
}

/// Port for mail dispatch. Called strictly after the owning transaction
/// commits; a `false` return (not delivered) never undoes persisted state.
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        to: &str,
        kind: MailKind,
        token: &str,
    ) -> Result<bool, AccountsServiceError>;
}
