use crate::domain::repository::{MailKind, Mailer};
use crate::error::AccountsServiceError;

/// Mail dispatch that records the send as a structured log line.
///
/// The actual transport sits behind the gateway's mail relay; this service
/// only needs the delivery boolean. Token values are not logged.
#[derive(Clone, Default)]
pub struct TracingMailer;

impl Mailer for TracingMailer {
    async fn send(
        &self,
        to: &str,
        kind: MailKind,
        _token: &str,
    ) -> Result<bool, AccountsServiceError> {
        tracing::info!(to, kind = kind.as_str(), "dispatching account mail");
        Ok(true)
    }
}
