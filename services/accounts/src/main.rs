use sea_orm::Database;
use tracing::info;

use atelier_accounts::config::AccountsConfig;
use atelier_accounts::router::build_router;
use atelier_accounts::state::AppState;

#[tokio::main]
async fn main() {
    atelier_core::tracing::init_tracing();

    let config = AccountsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.accounts_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("accounts service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
