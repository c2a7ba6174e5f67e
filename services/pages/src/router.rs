use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use atelier_core::health::{healthz, readyz};
use atelier_core::middleware::request_id_layer;

use crate::handlers::page::{
    create_page, delete_page, get_page, list_all_pages, list_published_pages, update_page,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Public content
        .route("/pages", get(list_published_pages))
        .route("/pages/{slug}", get(get_page))
        // Backoffice — the static segment wins over `{slug}` in matching,
        // and the update/delete handlers read the `{slug}` position as an id
        .route("/pages/all", get(list_all_pages))
        .route("/pages", post(create_page))
        .route("/pages/{slug}", patch(update_page))
        .route("/pages/{slug}", delete(delete_page))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
