//! Error types for the upload sequence

use reqwest::StatusCode;
use thiserror::Error;

use crate::file::REJECTION_MESSAGE;

/// Result type for upload operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that end an upload attempt
#[derive(Error, Debug)]
pub enum UploadError {
    /// The file did not pass the local extension filter
    #[error("{filename} rejected by the file filter")]
    Rejected {
        /// Name of the rejected file
        filename: String,
    },

    /// Upload requested with no file selected
    #[error("No file selected")]
    NoFileSelected,

    /// Another upload is still in flight
    #[error("An upload is already in progress")]
    Busy,

    /// Issuer base URL cannot be joined with the credential route
    #[error("Invalid issuer URL: {0}")]
    InvalidIssuerUrl(#[from] url::ParseError),

    /// Credential request did not complete
    #[error("Credential request failed: {0}")]
    Issue(#[source] reqwest::Error),

    /// Issuer answered with a non-success status
    #[error("Issuer responded with {0}")]
    IssuerStatus(StatusCode),

    /// PUT to the storage provider did not complete
    #[error("Upload request failed: {0}")]
    Transfer(#[source] reqwest::Error),

    /// Storage provider refused the PUT (expired or mismatched credential)
    #[error("Storage provider responded with {0}")]
    TransferStatus(StatusCode),
}

impl UploadError {
    /// Message suitable for the user; network and provider causes are not distinguished
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => REJECTION_MESSAGE,
            Self::NoFileSelected => "No file selected.",
            Self::Busy => "An upload is already in progress.",
            Self::InvalidIssuerUrl(_)
            | Self::Issue(_)
            | Self::IssuerStatus(_)
            | Self::Transfer(_)
            | Self::TransferStatus(_) => "Upload failed",
        }
    }
}
