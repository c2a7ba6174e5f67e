use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use atelier_accounts::domain::repository::{
    AccountRepository, MailKind, Mailer, TokenRepository,
};
use atelier_accounts::domain::types::{
    Account, AccountChanges, AccountSortBy, AccountToken, NewAccount, TokenPurpose,
};
use atelier_accounts::error::AccountsServiceError;
use atelier_domain::pagination::{PageRequest, Sort};
use atelier_domain::role::AccountRole;

// ── MockStore ────────────────────────────────────────────────────────────────

/// In-memory stand-in for the two tables, honoring the transactional
/// contract of the repository traits: a simulated failure mutates nothing.
#[derive(Default)]
pub struct StoreState {
    pub accounts: Vec<Account>,
    pub tokens: Vec<AccountToken>,
    pub next_account_id: i64,
    pub next_token_id: i64,
}

#[derive(Clone, Default)]
pub struct MockStore {
    pub state: Arc<Mutex<StoreState>>,
    /// Simulate the token insert failing after the account insert succeeded;
    /// the whole operation must then appear to have never happened.
    pub fail_token_insert: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                next_account_id: 1,
                next_token_id: 1,
                ..Default::default()
            })),
            fail_token_insert: false,
        }
    }

    pub fn failing_token_insert() -> Self {
        Self {
            fail_token_insert: true,
            ..Self::new()
        }
    }

    pub fn account_count(&self) -> usize {
        self.state.lock().unwrap().accounts.len()
    }

    pub fn token_count(&self) -> usize {
        self.state.lock().unwrap().tokens.len()
    }

    pub fn account(&self, id: i64) -> Option<Account> {
        self.state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    pub fn tokens_for(&self, account_id: i64, purpose: TokenPurpose) -> Vec<AccountToken> {
        self.state
            .lock()
            .unwrap()
            .tokens
            .iter()
            .filter(|t| t.account_id == account_id && t.purpose == purpose)
            .cloned()
            .collect()
    }

    /// Seed an account directly, bypassing registration.
    pub fn seed_account(&self, email: &str, password_hash: &str, is_active: bool) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_account_id;
        state.next_account_id += 1;
        let now = Utc::now();
        state.accounts.push(Account {
            id,
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "Account".to_owned(),
            role: AccountRole::Member,
            is_active,
            created_at: now,
            updated_at: now,
        });
        id
    }

    /// Seed a token directly, e.g. an already-expired one.
    pub fn seed_token(
        &self,
        account_id: i64,
        value: &str,
        purpose: TokenPurpose,
        expires_at: DateTime<Utc>,
    ) {
        let mut state = self.state.lock().unwrap();
        let id = state.next_token_id;
        state.next_token_id += 1;
        state.tokens.push(AccountToken {
            id,
            account_id,
            value: value.to_owned(),
            purpose,
            expires_at,
            created_at: Utc::now(),
        });
    }
}

impl AccountRepository for MockStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self.account(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn create_with_validation_token(
        &self,
        account: &NewAccount,
        token_value: &str,
        token_expires_at: DateTime<Utc>,
    ) -> Result<i64, AccountsServiceError> {
        if self.fail_token_insert {
            // Rolled back: neither row becomes visible.
            return Err(AccountsServiceError::Internal(anyhow::anyhow!(
                "simulated token insert failure"
            )));
        }
        let mut state = self.state.lock().unwrap();
        if state.accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountsServiceError::DuplicateEmail);
        }
        let account_id = state.next_account_id;
        state.next_account_id += 1;
        let now = Utc::now();
        state.accounts.push(Account {
            id: account_id,
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            role: account.role,
            is_active: false,
            created_at: now,
            updated_at: now,
        });
        let token_id = state.next_token_id;
        state.next_token_id += 1;
        state.tokens.push(AccountToken {
            id: token_id,
            account_id,
            value: token_value.to_owned(),
            purpose: TokenPurpose::Validation,
            expires_at: token_expires_at,
            created_at: now,
        });
        Ok(account_id)
    }

    async fn list(
        &self,
        sort_by: AccountSortBy,
        page: PageRequest,
    ) -> Result<Vec<Account>, AccountsServiceError> {
        let state = self.state.lock().unwrap();
        let mut accounts = state.accounts.clone();
        match sort_by {
            AccountSortBy::CreatedAt(Sort::Desc) => {
                accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            AccountSortBy::CreatedAt(Sort::Asc) => {
                accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            }
            AccountSortBy::Email(Sort::Desc) => {
                accounts.sort_by(|a, b| b.email.cmp(&a.email));
            }
            AccountSortBy::Email(Sort::Asc) => {
                accounts.sort_by(|a, b| a.email.cmp(&b.email));
            }
        }
        Ok(accounts
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        changes: &AccountChanges,
    ) -> Result<(), AccountsServiceError> {
        let mut state = self.state.lock().unwrap();
        let Some(account) = state.accounts.iter_mut().find(|a| a.id == id) else {
            return Err(AccountsServiceError::AccountNotFound);
        };
        if let Some(ref email) = changes.email {
            account.email = email.clone();
        }
        if let Some(ref first_name) = changes.first_name {
            account.first_name = first_name.clone();
        }
        if let Some(ref last_name) = changes.last_name {
            account.last_name = last_name.clone();
        }
        if let Some(role) = changes.role {
            account.role = role;
        }
        if let Some(is_active) = changes.is_active {
            account.is_active = is_active;
        }
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AccountsServiceError> {
        let mut state = self.state.lock().unwrap();
        let before = state.accounts.len();
        state.accounts.retain(|a| a.id != id);
        Ok(state.accounts.len() < before)
    }
}

impl TokenRepository for MockStore {
    async fn find_valid(
        &self,
        value: &str,
        purpose: TokenPurpose,
    ) -> Result<Option<AccountToken>, AccountsServiceError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .tokens
            .iter()
            .find(|t| t.value == value && t.purpose == purpose && t.is_valid())
            .cloned())
    }

    async fn consume_validation(
        &self,
        token: &AccountToken,
    ) -> Result<(), AccountsServiceError> {
        let mut state = self.state.lock().unwrap();
        if let Some(account) = state.accounts.iter_mut().find(|a| a.id == token.account_id) {
            account.is_active = true;
            account.updated_at = Utc::now();
        }
        state.tokens.retain(|t| t.id != token.id);
        Ok(())
    }

    async fn replace_reset(
        &self,
        account_id: i64,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountsServiceError> {
        let mut state = self.state.lock().unwrap();
        state
            .tokens
            .retain(|t| !(t.account_id == account_id && t.purpose == TokenPurpose::Reset));
        let id = state.next_token_id;
        state.next_token_id += 1;
        state.tokens.push(AccountToken {
            id,
            account_id,
            value: value.to_owned(),
            purpose: TokenPurpose::Reset,
            expires_at,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn consume_reset(
        &self,
        token: &AccountToken,
        new_password_hash: &str,
    ) -> Result<(), AccountsServiceError> {
        let mut state = self.state.lock().unwrap();
        if let Some(account) = state.accounts.iter_mut().find(|a| a.id == token.account_id) {
            account.password_hash = new_password_hash.to_owned();
            account.updated_at = Utc::now();
        }
        state.tokens.retain(|t| t.id != token.id);
        Ok(())
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<(String, MailKind, String)>>>,
    pub delivered: bool,
}

impl MockMailer {
    pub fn new(delivered: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            delivered,
        }
    }
}

impl Mailer for MockMailer {
    async fn send(
        &self,
        to: &str,
        kind: MailKind,
        token: &str,
    ) -> Result<bool, AccountsServiceError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), kind, token.to_owned()));
        Ok(self.delivered)
    }
}

// ── Fixture helpers ──────────────────────────────────────────────────────────

pub fn expired() -> DateTime<Utc> {
    Utc::now() - Duration::minutes(5)
}

pub fn in_one_hour() -> DateTime<Utc> {
    Utc::now() + Duration::hours(1)
}
