use sea_orm::DatabaseConnection;

use crate::infra::db::{DbAccountRepository, DbTokenRepository};
use crate::infra::mail::TracingMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn token_repo(&self) -> DbTokenRepository {
        DbTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn mailer(&self) -> TracingMailer {
        TracingMailer
    }
}
