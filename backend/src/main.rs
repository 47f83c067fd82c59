use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use backend::{issuer::CredentialIssuer, server, types::Environment};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON logs for staging/production, human-readable logs for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development { .. } => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let issuer_config = environment.issuer_config();

    if issuer_config.bucket_name.is_none() {
        tracing::warn!("S3_BUCKET_NAME is not set, every upload URL request will fail");
    }

    let issuer = Arc::new(CredentialIssuer::new(s3_client, issuer_config));

    server::start(environment, issuer).await
}
