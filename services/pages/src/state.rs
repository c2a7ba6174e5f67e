use sea_orm::DatabaseConnection;

use crate::infra::db::DbPageRepository;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn page_repo(&self) -> DbPageRepository {
        DbPageRepository {
            db: self.db.clone(),
        }
    }
}
