use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use upload_client::{SelectedFile, UploadClient, UploadForm};
use url::Url;

/// Upload a ZIP file to the bucket through a presigned URL
#[derive(Debug, Parser)]
#[command(name = "upload", version)]
struct Args {
    /// Base URL of the upload issuer; end it with `/` when mounted under a path
    #[arg(long, env = "UPLOAD_ISSUER_URL", default_value = "http://localhost:3001")]
    issuer: Url,

    /// Content type to declare; guessed from the file extension when omitted
    #[arg(long)]
    content_type: Option<String>,

    /// File to upload
    path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let file = SelectedFile::from_path(&args.path, args.content_type).await?;

    let mut form = UploadForm::new(UploadClient::new(args.issuer));
    if let Err(err) = form.select_file(file) {
        anyhow::bail!("{}", err.user_message());
    }

    let result = form.upload().await;
    let message = form.message().unwrap_or_default();

    match result {
        Ok(()) => {
            println!("{message}");
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "Upload did not complete");
            anyhow::bail!("{message}")
        }
    }
}
