//! Client side of the s3front upload flow
//!
//! Asks the issuer for a presigned PUT URL and sends the file bytes straight
//! to the storage provider.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod client;
mod error;
mod file;
mod form;

pub use client::{UploadClient, UploadState, SUCCESS_MESSAGE};
pub use error::{UploadError, UploadResult};
pub use file::{guess_content_type, FileFilter, SelectedFile, REJECTION_MESSAGE};
pub use form::UploadForm;
