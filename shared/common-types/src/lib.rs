//! Wire types shared by the credential issuer and the upload client

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Route serving presigned upload URLs
pub const PRESIGNED_URL_ROUTE: &str = "/generate-presigned-url";

/// HTTP method a presigned upload URL is signed for
pub const UPLOAD_METHOD: &str = "PUT";

/// Query parameters of a presigned upload URL request
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct PresignedUrlQuery {
    /// Name of the file, appended to the configured key prefix
    #[validate(length(min = 1))]
    #[schemars(length(min = 1))]
    pub filename: String,
    /// MIME type the upload must declare; empty binds no content type
    #[serde(default)]
    pub filetype: String,
}

/// Presigned upload credential returned by the issuer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PresignedUrlResponse {
    /// Presigned URL accepting a single PUT of the object
    pub url: String,
    /// HTTP method the URL is signed for, always `PUT`
    pub method: String,
    /// Storage key of the object
    pub key: String,
    /// Content type bound into the signature
    pub content_type: String,
    /// ISO-8601 UTC timestamp when the URL expires
    pub expires_at: String,
}
