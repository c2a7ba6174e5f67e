use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionError, TransactionTrait,
};

use atelier_accounts_schema::{account_tokens, accounts};
use atelier_domain::pagination::{PageRequest, Sort};
use atelier_domain::role::AccountRole;

use crate::domain::repository::{AccountRepository, TokenRepository};
use crate::domain::types::{
    Account, AccountChanges, AccountSortBy, AccountToken, NewAccount, TokenPurpose,
};
use crate::error::AccountsServiceError;

fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find account by email")?;
        model.map(account_from_model).transpose()
    }

    async fn create_with_validation_token(
        &self,
        account: &NewAccount,
        token_value: &str,
        token_expires_at: DateTime<Utc>,
    ) -> Result<i64, AccountsServiceError> {
        let result = self
            .db
            .transaction::<_, i64, sea_orm::DbErr>(|txn| {
                let account = account.clone();
                let value = token_value.to_owned();
                Box::pin(async move {
                    let now = Utc::now();
                    let inserted = accounts::ActiveModel {
                        id: NotSet,
                        email: Set(account.email),
                        password_hash: Set(account.password_hash),
                        first_name: Set(account.first_name),
                        last_name: Set(account.last_name),
                        role: Set(account.role.as_i16()),
                        is_active: Set(false),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    account_tokens::ActiveModel {
                        id: NotSet,
                        account_id: Set(inserted.id),
                        value: Set(value),
                        purpose: Set(TokenPurpose::Validation.as_str().to_owned()),
                        expires_at: Set(token_expires_at),
                        created_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    Ok(inserted.id)
                })
            })
            .await;

        match result {
            Ok(id) => Ok(id),
            Err(TransactionError::Transaction(ref e)) if is_unique_violation(e) => {
                Err(AccountsServiceError::DuplicateEmail)
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context("create account with validation token")
                .into()),
        }
    }

    async fn list(
        &self,
        sort_by: AccountSortBy,
        page: PageRequest,
    ) -> Result<Vec<Account>, AccountsServiceError> {
        let (column, direction) = match sort_by {
            AccountSortBy::CreatedAt(sort) => (accounts::Column::CreatedAt, sort),
            AccountSortBy::Email(sort) => (accounts::Column::Email, sort),
        };
        let order = match direction {
            Sort::Desc => sea_orm::Order::Desc,
            Sort::Asc => sea_orm::Order::Asc,
        };
        let models = accounts::Entity::find()
            .order_by(column, order)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list accounts")?;
        models.into_iter().map(account_from_model).collect()
    }

    async fn update(
        &self,
        id: i64,
        changes: &AccountChanges,
    ) -> Result<(), AccountsServiceError> {
        let mut am = accounts::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref email) = changes.email {
            am.email = Set(email.clone());
        }
        if let Some(ref first_name) = changes.first_name {
            am.first_name = Set(first_name.clone());
        }
        if let Some(ref last_name) = changes.last_name {
            am.last_name = Set(last_name.clone());
        }
        if let Some(role) = changes.role {
            am.role = Set(role.as_i16());
        }
        if let Some(is_active) = changes.is_active {
            am.is_active = Set(is_active);
        }
        am.updated_at = Set(Utc::now());
        match am.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(ref e) if is_unique_violation(e) => Err(AccountsServiceError::DuplicateEmail),
            Err(e) => Err(anyhow::Error::new(e).context("update account").into()),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AccountsServiceError> {
        let result = accounts::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete account")?;
        Ok(result.rows_affected > 0)
    }
}

fn account_from_model(model: accounts::Model) -> Result<Account, AccountsServiceError> {
    let role = AccountRole::from_i16(model.role)
        .ok_or_else(|| anyhow::anyhow!("unknown role value {} for account {}", model.role, model.id))?;
    Ok(Account {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        first_name: model.first_name,
        last_name: model.last_name,
        role,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Token repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTokenRepository {
    pub db: DatabaseConnection,
}

impl TokenRepository for DbTokenRepository {
    async fn find_valid(
        &self,
        value: &str,
        purpose: TokenPurpose,
    ) -> Result<Option<AccountToken>, AccountsServiceError> {
        let now = Utc::now();
        let model = account_tokens::Entity::find()
            .filter(account_tokens::Column::Value.eq(value))
            .filter(account_tokens::Column::Purpose.eq(purpose.as_str()))
            .filter(account_tokens::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find valid token")?;
        model.map(token_from_model).transpose()
    }

    async fn consume_validation(
        &self,
        token: &AccountToken,
    ) -> Result<(), AccountsServiceError> {
        let account_id = token.account_id;
        let token_id = token.id;
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    accounts::ActiveModel {
                        id: Set(account_id),
                        is_active: Set(true),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;

                    account_tokens::Entity::delete_by_id(token_id).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .context("consume validation token")?;
        Ok(())
    }

    async fn replace_reset(
        &self,
        account_id: i64,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountsServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let value = value.to_owned();
                Box::pin(async move {
                    account_tokens::Entity::delete_many()
                        .filter(account_tokens::Column::AccountId.eq(account_id))
                        .filter(
                            account_tokens::Column::Purpose.eq(TokenPurpose::Reset.as_str()),
                        )
                        .exec(txn)
                        .await?;

                    account_tokens::ActiveModel {
                        id: NotSet,
                        account_id: Set(account_id),
                        value: Set(value),
                        purpose: Set(TokenPurpose::Reset.as_str().to_owned()),
                        expires_at: Set(expires_at),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;
                    Ok(())
                })
            })
            .await
            .context("replace reset token")?;
        Ok(())
    }

    async fn consume_reset(
        &self,
        token: &AccountToken,
        new_password_hash: &str,
    ) -> Result<(), AccountsServiceError> {
        let account_id = token.account_id;
        let token_id = token.id;
        let new_hash = new_password_hash.to_owned();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    accounts::ActiveModel {
                        id: Set(account_id),
                        password_hash: Set(new_hash),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;

                    account_tokens::Entity::delete_by_id(token_id).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .context("consume reset token")?;
        Ok(())
    }
}

fn token_from_model(model: account_tokens::Model) -> Result<AccountToken, AccountsServiceError> {
    let purpose = TokenPurpose::from_str(&model.purpose).ok_or_else(|| {
        anyhow::anyhow!("unknown token purpose {:?} for token {}", model.purpose, model.id)
    })?;
    Ok(AccountToken {
        id: model.id,
        account_id: model.account_id,
        value: model.value,
        purpose,
        expires_at: model.expires_at,
        created_at: model.created_at,
    })
}
