//! Object storage primitive
//!
//! Upload by path, derive the public URL, delete by path. Used by the
//! gallery store's cleanup and by the bulk upload tool.

use super::Client;
use camerata_common::Result;
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct RemoveRequest<'a> {
    prefixes: [&'a str; 1],
}

impl Client {
    /// Upload an object into a bucket. Fails if the path already exists.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        debug!(bucket, path, size = bytes.len(), "upload object");
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url(), bucket, path);
        let response = self
            .authed(self.http.post(url))
            .header("Content-Type", content_type)
            .header("Cache-Control", "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        super::check_status(response).await?;
        Ok(())
    }

    /// Public URL for an object in a public bucket.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url(),
            bucket,
            path
        )
    }

    /// Remove an object from a bucket.
    pub async fn remove_object(&self, bucket: &str, path: &str) -> Result<()> {
        debug!(bucket, path, "remove object");
        let url = format!("{}/storage/v1/object/{}", self.base_url(), bucket);
        let response = self
            .authed(self.http.delete(url))
            .json(&RemoveRequest { prefixes: [path] })
            .send()
            .await?;

        super::check_status(response).await?;
        Ok(())
    }
}

/// Extract the object path from a public URL, if the URL points into the
/// given bucket of a managed storage host.
pub fn object_path_from_public_url(url: &str, bucket: &str) -> Option<String> {
    let marker = format!("/storage/v1/object/public/{bucket}/");
    url.find(&marker)
        .map(|pos| url[pos + marker.len()..].to_string())
        .filter(|path| !path.is_empty())
}
