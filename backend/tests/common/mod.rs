// Not every utils is used in every test, so we allow dead code
#![allow(dead_code)]

mod fake_storage;
pub use fake_storage::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::{error::CredentialsError, future, ProvideCredentials};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use axum::{body::Body, http::Request, response::Response, Router};
use backend::{
    issuer::{CredentialIssuer, IssuerConfig},
    server,
    types::Environment,
};
use http_body_util::BodyExt;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;
use url::Url;

pub const TEST_BUCKET: &str = "s3front-test-bucket";
pub const TEST_PREFIX: &str = "incoming";

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    dotenvy::from_path(".env.example").ok();
}

pub fn static_credentials() -> Credentials {
    Credentials::new(
        "AKIDEXAMPLE",
        "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
        None,
        None,
        "s3front-tests",
    )
}

/// Credentials provider that never yields credentials
#[derive(Debug)]
pub struct MissingCredentials;

impl ProvideCredentials for MissingCredentials {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::ready(Err(CredentialsError::not_loaded(
            "no credentials configured",
        )))
    }
}

/// S3 client configuration with explicit credentials and optional endpoint
pub fn s3_config(
    endpoint_url: Option<&str>,
    credentials: impl ProvideCredentials + 'static,
) -> aws_sdk_s3::Config {
    let mut builder = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .force_path_style(true);

    if let Some(endpoint_url) = endpoint_url {
        builder = builder.endpoint_url(endpoint_url);
    }

    builder.build()
}

pub fn issuer_config(expiry: Duration) -> IssuerConfig {
    IssuerConfig {
        bucket_name: Some(TEST_BUCKET.to_string()),
        key_prefix: TEST_PREFIX.to_string(),
        presigned_url_expiry: expiry,
    }
}

pub fn issuer(s3_config: aws_sdk_s3::Config, config: IssuerConfig) -> Arc<CredentialIssuer> {
    Arc::new(CredentialIssuer::new(
        Arc::new(S3Client::from_conf(s3_config)),
        config,
    ))
}

/// Issuer signing with static test credentials
pub fn signing_issuer() -> Arc<CredentialIssuer> {
    issuer(
        s3_config(None, static_credentials()),
        issuer_config(Duration::from_secs(60)),
    )
}

pub fn development() -> Environment {
    Environment::Development {
        presign_expiry_override: None,
    }
}

/// Router-level test setup
pub struct TestSetup {
    pub router: Router,
    pub issuer: Arc<CredentialIssuer>,
}

impl TestSetup {
    pub fn new(environment: Environment, issuer: Arc<CredentialIssuer>) -> Self {
        setup_test_env();

        let router = server::router(environment, issuer.clone());

        Self { router, issuer }
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Serves the issuer on an ephemeral local port and returns its base URL
pub async fn spawn_issuer(issuer: Arc<CredentialIssuer>) -> Url {
    setup_test_env();

    let router = server::router(development(), issuer);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .unwrap();
    });

    Url::parse(&format!("http://{addr}")).unwrap()
}

/// Counts error events emitted by this crate
#[derive(Clone, Default)]
pub struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() == Level::ERROR && metadata.target().starts_with("backend") {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Installs an error counter as the subscriber for the current thread
pub fn capture_errors() -> (ErrorCounter, tracing::subscriber::DefaultGuard) {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (counter, guard)
}
