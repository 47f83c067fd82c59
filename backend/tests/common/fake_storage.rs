use std::collections::HashMap;

use chrono::{NaiveDateTime, TimeDelta, Utc};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Storage provider stand-in enforcing what a presigned PUT must honour
///
/// Rejects requests past `X-Amz-Date + X-Amz-Expires` and requests whose
/// `Content-Type` differs from the one that was signed.
pub struct FakeObjectStore {
    signed_content_type: String,
}

impl FakeObjectStore {
    pub fn new(signed_content_type: &str) -> Self {
        Self {
            signed_content_type: signed_content_type.to_string(),
        }
    }

    /// Mounts the store for PUTs to `bucket/key`
    pub async fn mount(self, server: &MockServer, bucket: &str, key: &str) {
        Mock::given(method("PUT"))
            .and(path(format!("/{bucket}/{key}")))
            .respond_with(self)
            .mount(server)
            .await;
    }
}

fn s3_error(code: &str) -> ResponseTemplate {
    ResponseTemplate::new(403).set_body_string(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Error><Code>{code}</Code></Error>"
    ))
}

impl Respond for FakeObjectStore {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let query: HashMap<String, String> = request.url.query_pairs().into_owned().collect();

        let signed_at = query
            .get("X-Amz-Date")
            .and_then(|date| NaiveDateTime::parse_from_str(date, "%Y%m%dT%H%M%SZ").ok());
        let expires_in = query
            .get("X-Amz-Expires")
            .and_then(|secs| secs.parse::<i64>().ok());

        let (Some(signed_at), Some(expires_in)) = (signed_at, expires_in) else {
            return s3_error("AuthorizationQueryParametersError");
        };

        if Utc::now().naive_utc() > signed_at + TimeDelta::seconds(expires_in) {
            return s3_error("AccessDenied");
        }

        let content_type = request
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if content_type != self.signed_content_type {
            return s3_error("SignatureDoesNotMatch");
        }

        ResponseTemplate::new(200)
    }
}
