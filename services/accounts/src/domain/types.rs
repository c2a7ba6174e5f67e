use chrono::{DateTime, Utc};

use atelier_domain::pagination::Sort;
use atelier_domain::role::AccountRole;

/// Full account record as stored.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: AccountRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a not-yet-persisted account. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: AccountRole,
}

/// Partial update applied by the admin backoffice.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<AccountRole>,
    pub is_active: Option<bool>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
    }
}

/// Sort options for the backoffice account listing.
#[derive(Debug, Clone, Copy)]
pub enum AccountSortBy {
    CreatedAt(Sort),
    Email(Sort),
}

impl Default for AccountSortBy {
    fn default() -> Self {
        Self::CreatedAt(Sort::Desc)
    }
}

impl AccountSortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "created-at-desc" => Some(Self::CreatedAt(Sort::Desc)),
            "created-at-asc" => Some(Self::CreatedAt(Sort::Asc)),
            "email-desc" => Some(Self::Email(Sort::Desc)),
            "email-asc" => Some(Self::Email(Sort::Asc)),
            _ => None,
        }
    }
}

/// What a single-use token is exchanged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    Validation,
    Reset,
}

impl TokenPurpose {
    /// Stored text value (legacy schema contract).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Reset => "reset",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "validation" => Some(Self::Validation),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Outstanding single-use token. A row's presence means "not consumed";
/// exchange deletes it.
#[derive(Debug, Clone)]
pub struct AccountToken {
    pub id: i64,
    pub account_id: i64,
    pub value: String,
    pub purpose: TokenPurpose,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl AccountToken {
    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

/// Validation token time-to-live (activation links).
pub const VALIDATION_TOKEN_TTL_HOURS: i64 = 24;

/// Reset token time-to-live (password reset links).
pub const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Token value length in characters (32 random bytes, hex-encoded).
pub const TOKEN_LEN: usize = 64;

/// Minimum raw password length accepted at registration and reset.
pub const MIN_PASSWORD_LEN: usize = 8;
