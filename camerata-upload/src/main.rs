//! camerata-upload - Bulk gallery uploader
//!
//! Uploads every image in a staging directory to the gallery bucket and
//! inserts a catalog row per image. Requires a configured backend; exits
//! non-zero when configuration or the directory is missing. Per-file
//! failures are counted and reported, not fatal.

use anyhow::{bail, Context, Result};
use camerata_common::config::{resolve_admin_credentials, resolve_backend_config, TomlConfig};
use camerata_common::models::{GalleryKind, GalleryPayload};
use camerata_sync::backend::Client;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

mod scanner;

use scanner::{content_type_for, title_from_filename, ImageScanner};

/// Files above this size are skipped and counted as failures
const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024; // 50MB

#[derive(Parser)]
#[command(name = "camerata-upload", version)]
#[command(about = "Bulk-upload images into the site gallery")]
struct Args {
    /// Directory containing the images to upload
    directory: PathBuf,

    /// Storage bucket receiving the uploads
    #[arg(long, default_value = "gallery")]
    bucket: String,

    /// Catalog table receiving one row per uploaded image
    #[arg(long, default_value = "gallery_items")]
    table: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting camerata-upload v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let toml_config = TomlConfig::load();
    let Some(backend_config) = resolve_backend_config(&toml_config) else {
        bail!(
            "backend not configured: set CAMERATA_BACKEND_URL and CAMERATA_BACKEND_ANON_KEY \
             (or provide a config file)"
        );
    };
    let client = Client::new(&backend_config)?;

    // An anonymous session usually cannot write; warn and try anyway.
    match resolve_admin_credentials(&toml_config) {
        Some(credentials) => {
            match client
                .sign_in_with_password(&credentials.email, &credentials.password)
                .await
            {
                Ok(_) => info!("Authenticated as {}", credentials.email),
                Err(e) => warn!("Admin sign-in failed, continuing anonymously: {e}"),
            }
        }
        None => warn!("No admin credentials configured; uploads may be rejected"),
    }

    let scanner = ImageScanner::new();
    let files = scanner
        .scan(&args.directory)
        .with_context(|| format!("cannot scan {}", args.directory.display()))?;

    if files.is_empty() {
        info!("No images found in {}", args.directory.display());
        return Ok(());
    }
    info!("Found {} images in {}", files.len(), args.directory.display());

    let mut uploaded = 0usize;
    let mut failed = 0usize;

    for path in &files {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("{}: read failed: {e}", path.display());
                failed += 1;
                continue;
            }
        };

        if bytes.len() as u64 > MAX_FILE_SIZE {
            warn!(
                "{}: too large ({:.2} MB), skipping",
                path.display(),
                bytes.len() as f64 / 1024.0 / 1024.0
            );
            failed += 1;
            continue;
        }

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let object_path = format!("{}.{}", Uuid::new_v4(), extension);
        let content_type = content_type_for(path);

        info!("Uploading {}", path.display());
        if let Err(e) = client
            .upload_object(&args.bucket, &object_path, bytes, content_type)
            .await
        {
            warn!("{}: upload failed: {e}", path.display());
            failed += 1;
            continue;
        }

        let public_url = client.public_url(&args.bucket, &object_path);
        let payload = GalleryPayload {
            title: title_from_filename(path),
            kind: GalleryKind::Image,
            url: public_url.clone(),
            thumbnail_url: Some(public_url),
        };

        if let Err(e) = client.insert(&args.table, &payload).await {
            warn!("{}: catalog insert failed: {e}", path.display());
            // Do not leave an orphaned object behind.
            if let Err(e) = client.remove_object(&args.bucket, &object_path).await {
                warn!("{object_path}: cleanup after failed insert also failed: {e}");
            }
            failed += 1;
            continue;
        }

        info!("{} uploaded", path.display());
        uploaded += 1;
    }

    info!(
        "Summary: {} uploaded, {} failed, {} total",
        uploaded,
        failed,
        files.len()
    );

    Ok(())
}
