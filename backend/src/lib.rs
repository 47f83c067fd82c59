//! s3front upload issuer
//!
//! Hands out short-lived presigned PUT URLs so clients can upload files
//! straight to the bucket without streaming bytes through this service.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Presigned upload credential issuance
pub mod issuer;

/// HTTP routes
pub mod routes;

/// Server bootstrap
pub mod server;

/// Configuration, errors and extractors
pub mod types;
