//! File selection and the local extension filter

use std::path::Path;

/// Message shown when a selected file does not pass the filter
pub const REJECTION_MESSAGE: &str = "Please select a ZIP file.";

/// Accepts only files whose name ends in a given extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    extension: String,
}

impl FileFilter {
    /// Creates a filter for `extension`, with or without the leading dot
    #[must_use]
    pub fn new(extension: &str) -> Self {
        let extension = extension.trim_start_matches('.').to_lowercase();
        Self {
            extension: format!(".{extension}"),
        }
    }

    /// Filter accepting `.zip` archives
    #[must_use]
    pub fn zip() -> Self {
        Self::new("zip")
    }

    /// Whether `filename` ends in the accepted extension, ignoring case
    #[must_use]
    pub fn accepts(&self, filename: &str) -> bool {
        filename.to_lowercase().ends_with(&self.extension)
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::zip()
    }
}

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name, used as the last segment of the storage key
    pub name: String,
    /// Declared MIME type; may be empty when unknown
    pub content_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Creates a selected file from its parts
    #[must_use]
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk
    ///
    /// Without an explicit content type one is guessed from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the path has no file name or cannot be read
    pub async fn from_path(path: &Path, content_type: Option<String>) -> std::io::Result<Self> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{} has no file name", path.display()),
                )
            })?;

        let content_type = content_type.unwrap_or_else(|| guess_content_type(&name).to_string());
        let bytes = tokio::fs::read(path).await?;

        Ok(Self::new(name, content_type, bytes))
    }
}

/// MIME type for a file name, as a browser would report it
#[must_use]
pub fn guess_content_type(filename: &str) -> &'static str {
    let lower = filename.to_lowercase();
    match lower.rsplit_once('.').map(|(_, ext)| ext) {
        Some("zip") => "application/zip",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "",
    }
}
