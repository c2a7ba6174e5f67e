use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use atelier_core::identity::IdentityHeaders;
use atelier_domain::pagination::PageRequest;
use atelier_domain::role::AccountRole;

use crate::domain::repository::{MailKind, Mailer};
use crate::domain::types::{Account, AccountChanges, AccountSortBy};
use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::activate::ActivateAccountUseCase;
use crate::usecase::admin::{DeleteAccountUseCase, ListAccountsUseCase, UpdateAccountUseCase};
use crate::usecase::register::{RegisterInput, RegisterUseCase};

#[derive(Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: AccountRole,
    pub is_active: bool,
    #[serde(serialize_with = "atelier_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "atelier_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            role: account.role,
            is_active: account.is_active,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

// ── POST /accounts ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: i64,
    /// Whether the activation mail was handed off; the registration itself
    /// is committed either way and the account can retry via support.
    pub email_delivered: bool,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AccountsServiceError> {
    let email = body.email.trim().to_owned();
    let usecase = RegisterUseCase {
        accounts: state.account_repo(),
    };
    let output = usecase
        .execute(RegisterInput {
            email: email.clone(),
            password: body.password,
            first_name: body.first_name.trim().to_owned(),
            last_name: body.last_name.trim().to_owned(),
        })
        .await?;

    // Mail dispatch happens strictly after the commit; a failed send never
    // undoes the registration.
    let email_delivered = state
        .mailer()
        .send(&email, MailKind::Validation, &output.token)
        .await
        .unwrap_or(false);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: output.account_id,
            email_delivered,
        }),
    ))
}

// ── GET /accounts/activate ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ActivateParams {
    #[serde(default)]
    pub token: String,
}

pub async fn activate(
    State(state): State<AppState>,
    Query(params): Query<ActivateParams>,
) -> Result<StatusCode, AccountsServiceError> {
    if params.token.is_empty() {
        return Err(AccountsServiceError::InvalidOrExpiredToken);
    }
    let usecase = ActivateAccountUseCase {
        tokens: state.token_repo(),
    };
    usecase.execute(&params.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /accounts ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AccountListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub sort_by: Option<String>,
}

pub async fn list_accounts(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<AccountListQuery>,
) -> Result<Json<Vec<AccountResponse>>, AccountsServiceError> {
    if !identity.is_admin() {
        return Err(AccountsServiceError::Forbidden);
    }
    let sort_by = query
        .sort_by
        .as_deref()
        .map(AccountSortBy::from_kebab_case)
        .unwrap_or(Some(AccountSortBy::default()))
        .unwrap_or_default();
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let usecase = ListAccountsUseCase {
        accounts: state.account_repo(),
    };
    let accounts = usecase.execute(sort_by, page).await?;
    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

// ── PATCH /accounts/{id} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<AccountRole>,
    pub is_active: Option<bool>,
}

pub async fn update_account(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    if !identity.is_admin() {
        return Err(AccountsServiceError::Forbidden);
    }
    let usecase = UpdateAccountUseCase {
        accounts: state.account_repo(),
    };
    usecase
        .execute(
            id,
            AccountChanges {
                email: body.email,
                first_name: body.first_name,
                last_name: body.last_name,
                role: body.role,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /accounts/{id} ────────────────────────────────────────────────────

pub async fn delete_account(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AccountsServiceError> {
    if !identity.is_admin() {
        return Err(AccountsServiceError::Forbidden);
    }
    let usecase = DeleteAccountUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
