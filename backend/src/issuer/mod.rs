//! Presigned upload credential issuance
mod error;

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use aws_sdk_s3::{presigning::PresigningConfig, Client as S3Client};
use chrono::{DateTime, Utc};
use common_types::UPLOAD_METHOD;
use tracing::{debug, error};

pub use error::{IssuerError, IssuerResult};

/// Provider settings fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerConfig {
    /// Target bucket; `None` makes every issuance fail
    pub bucket_name: Option<String>,
    /// Prefix prepended to every storage key
    pub key_prefix: String,
    /// Validity window of issued URLs
    pub presigned_url_expiry: Duration,
}

impl IssuerConfig {
    /// Maps a filename to the key it is stored under
    ///
    /// Same filename, same key: concurrent uploads of one name overwrite each other.
    #[must_use]
    pub fn storage_key(&self, filename: &str) -> String {
        let prefix = self.key_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            filename.to_string()
        } else {
            format!("{prefix}/{filename}")
        }
    }
}

/// Presigned PUT credential for a single object
#[derive(Debug, Clone)]
pub struct PresignedCredential {
    /// The presigned URL for PUT operations
    pub url: String,
    /// HTTP method the URL is signed for
    pub method: &'static str,
    /// Storage key the URL writes to
    pub key: String,
    /// Content type bound into the signature, empty when none was bound
    pub content_type: String,
    /// ISO-8601 UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Issues presigned upload URLs against the configured bucket
pub struct CredentialIssuer {
    s3_client: Arc<S3Client>,
    config: IssuerConfig,
}

impl CredentialIssuer {
    /// Creates a new credential issuer
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client holding the provider credentials
    /// * `config` - Bucket, key prefix and expiry settings
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, config: IssuerConfig) -> Self {
        Self { s3_client, config }
    }

    /// Returns the settings this issuer signs with
    #[must_use]
    pub const fn config(&self) -> &IssuerConfig {
        &self.config
    }

    /// Issues a presigned PUT URL for `filename`
    ///
    /// The content type is bound into the signature, so the upload must send
    /// an identical `Content-Type` header. An empty content type binds none.
    /// Signing is local and never retried.
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::InvalidInput` if `filename` is empty
    /// Returns `IssuerError::ConfigError` if no bucket is configured or the expiry is unusable
    /// Returns `IssuerError::SigningError` if the signing primitive fails
    pub async fn issue_upload_credential(
        &self,
        filename: &str,
        content_type: &str,
    ) -> IssuerResult<PresignedCredential> {
        if filename.is_empty() {
            return Err(IssuerError::InvalidInput("filename is empty".to_string()));
        }

        let key = self.config.storage_key(filename);

        match self.sign_put(&key, content_type).await {
            Ok(credential) => {
                debug!(
                    key = %credential.key,
                    expires_at = %credential.expires_at,
                    "Issued presigned upload URL"
                );
                Ok(credential)
            }
            Err(err) => {
                error!(key = %key, error = %err, "Failed to issue presigned upload URL");
                Err(err)
            }
        }
    }

    async fn sign_put(&self, key: &str, content_type: &str) -> IssuerResult<PresignedCredential> {
        let bucket_name = self.config.bucket_name.as_deref().ok_or_else(|| {
            IssuerError::ConfigError("S3_BUCKET_NAME environment variable not set".to_string())
        })?;

        let issued_at = SystemTime::now();
        let presigned_config = PresigningConfig::builder()
            .start_time(issued_at)
            .expires_in(self.config.presigned_url_expiry)
            .build()
            .map_err(|e| {
                IssuerError::ConfigError(format!("Failed to create presigning config: {e}"))
            })?;

        let presigned_request = self
            .s3_client
            .put_object()
            .bucket(bucket_name)
            .key(key)
            .set_content_type((!content_type.is_empty()).then(|| content_type.to_string()))
            .presigned(presigned_config)
            .await?;

        let expires_at: DateTime<Utc> = (issued_at + self.config.presigned_url_expiry).into();

        Ok(PresignedCredential {
            url: presigned_request.uri().to_string(),
            method: UPLOAD_METHOD,
            key: key.to_string(),
            content_type: content_type.to_string(),
            expires_at,
        })
    }
}
