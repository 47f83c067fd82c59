//! Two-stage upload: request a presigned credential, then PUT the bytes

use std::sync::atomic::{AtomicBool, Ordering};

use common_types::{PresignedUrlQuery, PresignedUrlResponse, PRESIGNED_URL_ROUTE};
use reqwest::header::CONTENT_TYPE;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::{UploadError, UploadResult};
use crate::file::{FileFilter, SelectedFile};

/// Message shown after a successful upload
pub const SUCCESS_MESSAGE: &str = "Upload completed successfully!";

/// Client-local state of the upload trigger
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    /// Nothing has been uploaded yet
    #[default]
    Idle,
    /// Credential request or transfer in flight
    Uploading,
    /// Last upload reached the bucket
    Success,
    /// Last upload failed, with the user-facing message
    Error(String),
}

impl UploadState {
    /// Label of the upload trigger in this state
    #[must_use]
    pub const fn trigger_label(&self) -> &'static str {
        match self {
            Self::Uploading => "Uploading...",
            Self::Idle | Self::Success | Self::Error(_) => "Upload",
        }
    }
}

/// Held for the length of one upload attempt
///
/// Dropping it clears the busy flag. An attempt dropped before it finished
/// leaves the state at `Uploading`, so that state falls back to `Idle`.
struct BusyGuard<'a> {
    busy: &'a AtomicBool,
    state: &'a watch::Sender<UploadState>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(busy: &'a AtomicBool, state: &'a watch::Sender<UploadState>) -> Option<Self> {
        busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { busy, state })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            if *state == UploadState::Uploading {
                debug!("Upload abandoned before completion");
                *state = UploadState::Idle;
                true
            } else {
                false
            }
        });
        self.busy.store(false, Ordering::Release);
    }
}

/// Uploads files through presigned URLs handed out by the issuer
///
/// Each upload is a single attempt. A second upload while one is in flight
/// is refused rather than queued.
pub struct UploadClient {
    http: reqwest::Client,
    issuer_url: Url,
    filter: FileFilter,
    busy: AtomicBool,
    state: watch::Sender<UploadState>,
}

impl UploadClient {
    /// Creates a client talking to the issuer at `issuer_url`
    ///
    /// The credential route is resolved relative to `issuer_url`, so an issuer
    /// mounted under a path needs a trailing slash (`http://host/api/`).
    #[must_use]
    pub fn new(issuer_url: Url) -> Self {
        Self::with_http_client(reqwest::Client::new(), issuer_url)
    }

    /// Creates a client with a pre-configured HTTP client
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, issuer_url: Url) -> Self {
        let (state, _) = watch::channel(UploadState::Idle);
        Self {
            http,
            issuer_url,
            filter: FileFilter::default(),
            busy: AtomicBool::new(false),
            state,
        }
    }

    /// Replaces the file filter (`.zip` by default)
    #[must_use]
    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Filter applied before any network call
    #[must_use]
    pub const fn filter(&self) -> &FileFilter {
        &self.filter
    }

    /// Subscribes to upload state transitions
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    /// Current upload state
    #[must_use]
    pub fn state(&self) -> UploadState {
        self.state.borrow().clone()
    }

    /// Whether an upload is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Uploads `file`: requests a credential, then PUTs the bytes to it
    ///
    /// Files rejected by the filter fail before any request is made.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Rejected` if the filter refuses the file
    /// Returns `UploadError::Busy` if another upload is in flight
    /// Returns the credential or transfer error that ended the attempt
    #[instrument(skip(self, file), fields(filename = %file.name))]
    pub async fn upload_file(&self, file: &SelectedFile) -> UploadResult<()> {
        if !self.filter.accepts(&file.name) {
            debug!("File rejected by filter");
            return Err(UploadError::Rejected {
                filename: file.name.clone(),
            });
        }

        let _guard = BusyGuard::acquire(&self.busy, &self.state).ok_or(UploadError::Busy)?;
        self.state.send_replace(UploadState::Uploading);

        let result = match self.request_credential(file).await {
            Ok(credential) => self.transfer(file, &credential).await,
            Err(err) => Err(err),
        };

        match &result {
            Ok(()) => {
                info!("Upload completed");
                self.state.send_replace(UploadState::Success);
            }
            Err(err) => {
                warn!(error = %err, "Upload failed");
                self.state
                    .send_replace(UploadState::Error(err.user_message().to_string()));
            }
        }

        result
    }

    /// Asks the issuer for a presigned PUT URL for `file`
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Issue` on network failure or an unreadable body
    /// Returns `UploadError::IssuerStatus` if the issuer does not answer 2xx
    pub async fn request_credential(&self, file: &SelectedFile) -> UploadResult<PresignedUrlResponse> {
        let url = self
            .issuer_url
            .join(PRESIGNED_URL_ROUTE.trim_start_matches('/'))?;
        let query = PresignedUrlQuery {
            filename: file.name.clone(),
            filetype: file.content_type.clone(),
        };

        let response = self
            .http
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(UploadError::Issue)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::IssuerStatus(status));
        }

        let credential = response
            .json::<PresignedUrlResponse>()
            .await
            .map_err(UploadError::Issue)?;

        debug!(key = %credential.key, expires_at = %credential.expires_at, "Received upload credential");
        Ok(credential)
    }

    /// PUTs the raw bytes of `file` to a presigned URL
    ///
    /// `Content-Type` must match what was signed, so it is sent exactly as
    /// declared on the file and omitted when empty.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Transfer` on network failure
    /// Returns `UploadError::TransferStatus` if the provider does not answer 2xx
    pub async fn transfer(
        &self,
        file: &SelectedFile,
        credential: &PresignedUrlResponse,
    ) -> UploadResult<()> {
        let mut request = self.http.put(&credential.url).body(file.bytes.clone());
        if !file.content_type.is_empty() {
            request = request.header(CONTENT_TYPE, &file.content_type);
        }

        let response = request.send().await.map_err(UploadError::Transfer)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::TransferStatus(status));
        }

        Ok(())
    }
}
