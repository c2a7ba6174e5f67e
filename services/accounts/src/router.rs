use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use atelier_core::health::{healthz, readyz};
use atelier_core::middleware::request_id_layer;

use crate::handlers::{
    account::{activate, delete_account, list_accounts, register, update_account},
    auth::{forgot_password, login, reset_password},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registration and activation
        .route("/accounts", post(register))
        .route("/accounts/activate", get(activate))
        // Login and password reset
        .route("/auth/login", post(login))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
        // Backoffice
        .route("/accounts", get(list_accounts))
        .route("/accounts/{id}", patch(update_account))
        .route("/accounts/{id}", delete(delete_account))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
