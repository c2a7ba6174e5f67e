/// Pages service configuration loaded from environment variables.
#[derive(Debug)]
pub struct PagesConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3112). Env var: `PAGES_PORT`.
    pub pages_port: u16,
}

impl PagesConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            pages_port: std::env::var("PAGES_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3112),
        }
    }
}
