use std::sync::Arc;

use aide::axum::IntoApiResponse;
use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;

use crate::issuer::CredentialIssuer;

/// Liveness report
#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    status: String,
    /// Current version of the application
    semver: String,
    /// Commit hash of the current build (if available)
    rev: Option<String>,
    /// Whether a target bucket is configured; without one every issuance fails
    bucket_configured: bool,
}

/// Health check endpoint
///
/// Reports version information and whether the issuer can sign at all.
#[allow(clippy::unused_async)]
pub async fn handler(Extension(issuer): Extension<Arc<CredentialIssuer>>) -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        rev: option_env!("GIT_REV").map(ToString::to_string),
        bucket_configured: issuer.config().bucket_name.is_some(),
    })
}
