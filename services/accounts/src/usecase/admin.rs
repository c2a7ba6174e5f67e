use atelier_domain::email::validate_email;
use atelier_domain::pagination::PageRequest;

use crate::domain::repository::AccountRepository;
use crate::domain::types::{Account, AccountChanges, AccountSortBy};
use crate::error::AccountsServiceError;

// ── ListAccounts ─────────────────────────────────────────────────────────────

pub struct ListAccountsUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> ListAccountsUseCase<A> {
    pub async fn execute(
        &self,
        sort_by: AccountSortBy,
        page: PageRequest,
    ) -> Result<Vec<Account>, AccountsServiceError> {
        self.accounts.list(sort_by, page.clamped()).await
    }
}

// ── UpdateAccount ────────────────────────────────────────────────────────────

pub struct UpdateAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> UpdateAccountUseCase<A> {
    pub async fn execute(
        &self,
        account_id: i64,
        changes: AccountChanges,
    ) -> Result<(), AccountsServiceError> {
        if changes.is_empty() {
            return Err(AccountsServiceError::MissingData);
        }
        if let Some(ref email) = changes.email {
            if !validate_email(email) {
                return Err(AccountsServiceError::InvalidEmail);
            }
        }
        if self.accounts.find_by_id(account_id).await?.is_none() {
            return Err(AccountsServiceError::AccountNotFound);
        }
        self.accounts.update(account_id, &changes).await
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> DeleteAccountUseCase<A> {
    pub async fn execute(&self, account_id: i64) -> Result<(), AccountsServiceError> {
        if self.accounts.delete(account_id).await? {
            Ok(())
        } else {
            Err(AccountsServiceError::AccountNotFound)
        }
    }
}
