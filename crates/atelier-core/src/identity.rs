//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

/// Caller identity injected by the gateway via `x-atelier-account-id` and
/// `x-atelier-account-role` headers.
///
/// Returns 401 if either header is absent or cannot be parsed.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub account_id: i64,
    pub account_role: i16,
}

impl IdentityHeaders {
    /// Admin wire role id (legacy schema value).
    pub const ADMIN_ROLE: i16 = 1;

    pub fn is_admin(&self) -> bool {
        self.account_role == Self::ADMIN_ROLE
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let account_id = parts
            .headers
            .get("x-atelier-account-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok());

        let account_role = parts
            .headers
            .get("x-atelier-account-role")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<i16>().ok());

        async move {
            let account_id = account_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let account_role = account_role.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                account_id,
                account_role,
            })
        }
    }
}
