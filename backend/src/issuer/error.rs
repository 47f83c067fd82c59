//! Error types for credential issuance

use aws_sdk_s3::{
    error::{DisplayErrorContext, SdkError},
    operation::put_object::PutObjectError,
};
use thiserror::Error;

/// Result type for issuer operations
pub type IssuerResult<T> = Result<T, IssuerError>;

/// Errors that can occur while issuing an upload credential
#[derive(Error, Debug)]
pub enum IssuerError {
    /// Provider configuration is missing or unusable
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The signing primitive refused to produce a URL
    #[error("Signing error: {0}")]
    SigningError(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<SdkError<PutObjectError>> for IssuerError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        Self::SigningError(DisplayErrorContext(&error).to_string())
    }
}
