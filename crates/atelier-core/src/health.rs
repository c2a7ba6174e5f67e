/// Handler for `GET /healthz` — process liveness.
pub async fn healthz() -> &'static str {
    "ok"
}

/// Handler for `GET /readyz` — readiness. A service whose readiness depends
/// on an external resource should mount its own probe instead.
pub async fn readyz() -> &'static str {
    "ok"
}
