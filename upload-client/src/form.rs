//! Upload form model: file picker, trigger and status message

use crate::client::{UploadClient, SUCCESS_MESSAGE};
use crate::error::{UploadError, UploadResult};
use crate::file::{SelectedFile, REJECTION_MESSAGE};

/// State behind a single-file upload form
pub struct UploadForm {
    client: UploadClient,
    selected: Option<SelectedFile>,
    message: Option<String>,
}

impl UploadForm {
    /// Creates an empty form backed by `client`
    #[must_use]
    pub const fn new(client: UploadClient) -> Self {
        Self {
            client,
            selected: None,
            message: None,
        }
    }

    /// Client performing the uploads
    #[must_use]
    pub const fn client(&self) -> &UploadClient {
        &self.client
    }

    /// Picks a file, replacing any previous selection
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Rejected` and clears the selection if the filter refuses the file
    pub fn select_file(&mut self, file: SelectedFile) -> UploadResult<()> {
        if self.client.filter().accepts(&file.name) {
            self.selected = Some(file);
            self.message = None;
            Ok(())
        } else {
            self.selected = None;
            self.message = Some(REJECTION_MESSAGE.to_string());
            Err(UploadError::Rejected { filename: file.name })
        }
    }

    /// Currently selected file
    #[must_use]
    pub const fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Whether the upload trigger is enabled
    #[must_use]
    pub fn can_upload(&self) -> bool {
        self.selected.is_some() && !self.client.is_busy()
    }

    /// Label of the upload trigger
    #[must_use]
    pub fn trigger_label(&self) -> &'static str {
        self.client.state().trigger_label()
    }

    /// Status message for the user, if any
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Uploads the selected file
    ///
    /// # Errors
    ///
    /// Returns `UploadError::NoFileSelected` if nothing is selected
    /// Returns the error that ended the upload otherwise
    pub async fn upload(&mut self) -> UploadResult<()> {
        let file = self.selected.as_ref().ok_or(UploadError::NoFileSelected)?;
        self.message = None;

        let result = self.client.upload_file(file).await;

        self.message = Some(match &result {
            Ok(()) => SUCCESS_MESSAGE.to_string(),
            Err(err) => err.user_message().to_string(),
        });

        result
    }
}
