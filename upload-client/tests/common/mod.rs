// Not every helper is used in every test
#![allow(dead_code)]

use serde_json::json;
use upload_client::{SelectedFile, UploadClient};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ZIP_BYTES: &[u8] = b"PK\x03\x04fake archive contents";

/// A ZIP file as the browser would hand it over
pub fn zip_file() -> SelectedFile {
    SelectedFile::new("archive.zip", "application/zip", ZIP_BYTES.to_vec())
}

/// A file the ZIP filter refuses
pub fn text_file() -> SelectedFile {
    SelectedFile::new("notes.txt", "text/plain", b"hello".to_vec())
}

pub fn client_for(issuer: &MockServer) -> UploadClient {
    UploadClient::new(Url::parse(&issuer.uri()).unwrap())
}

/// Presigned URL pointing at the fake storage provider
pub fn presigned_url(storage: &MockServer, filename: &str) -> String {
    format!(
        "{}/bucket/uploads/{filename}?X-Amz-Expires=60&X-Amz-SignedHeaders=content-type%3Bhost",
        storage.uri()
    )
}

pub fn credential_body(storage: &MockServer, filename: &str, content_type: &str) -> serde_json::Value {
    json!({
        "url": presigned_url(storage, filename),
        "method": "PUT",
        "key": format!("uploads/{filename}"),
        "content_type": content_type,
        "expires_at": "2030-01-01T00:00:00+00:00"
    })
}

/// Mounts an issuer answering credential requests for `archive.zip`
pub async fn mount_issuer(issuer: &MockServer, storage: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/generate-presigned-url"))
        .and(query_param("filename", "archive.zip"))
        .and(query_param("filetype", "application/zip"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(credential_body(
                storage,
                "archive.zip",
                "application/zip",
            )),
        )
        .mount(issuer)
        .await;
}

pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map_or(0, |requests| requests.len())
}
