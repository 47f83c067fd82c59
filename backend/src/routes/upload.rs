use std::sync::Arc;

use axum::{Extension, Json};
use common_types::{PresignedUrlQuery, PresignedUrlResponse};
use tracing::instrument;

use crate::{
    issuer::CredentialIssuer,
    types::{AppError, ValidatedQuery},
};

/// Issues a presigned URL for uploading a file straight to the bucket
///
/// The returned URL accepts one `PUT` of the file bytes for a limited time.
/// The upload must send `Content-Type` equal to `filetype`, otherwise the
/// storage provider rejects it.
///
/// # Errors
///
/// - `400` when `filename` is missing or empty
/// - `500` when the URL could not be signed; the cause is only logged
#[instrument(skip(issuer))]
pub async fn generate_presigned_url(
    Extension(issuer): Extension<Arc<CredentialIssuer>>,
    ValidatedQuery(query): ValidatedQuery<PresignedUrlQuery>,
) -> Result<Json<PresignedUrlResponse>, AppError> {
    let credential = issuer
        .issue_upload_credential(&query.filename, &query.filetype)
        .await?;

    Ok(Json(PresignedUrlResponse {
        url: credential.url,
        method: credential.method.to_string(),
        key: credential.key,
        content_type: credential.content_type,
        expires_at: credential.expires_at.to_rfc3339(),
    }))
}
