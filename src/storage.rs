use crate::error::HttpError;

/// Client for the object-storage HTTP API where site images live.
///
/// Uploads go through the authenticated object endpoint; the public site
/// reads back through the public URL, so this client never needs a
/// download path.
///
/// Cloning is cheap because reqwest::Client uses Arc internally
#[derive(Clone)]
pub struct StorageClient {
    pub conn: reqwest::Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl StorageClient {
    pub fn new(conn: reqwest::Client, base_url: String, bucket: String, service_key: String) -> Self {
        Self {
            conn,
            base_url,
            bucket,
            service_key,
        }
    }

    /// Uploads a file into the bucket and returns its public URL.
    pub async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, HttpError> {
        let full_url = format!("{}/object/{}/{}", self.base_url, self.bucket, path);

        let response = self
            .conn
            .post(full_url)
            .bearer_auth(&self.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("storage upload failed ({}): {}", status, body);
            return Err(HttpError::server_error(format!(
                "storage upload failed with status {}",
                status
            )));
        }

        Ok(self.public_url(path))
    }

    pub fn public_url(&self, path: &str) -> String {
        format!("{}/object/public/{}/{}", self.base_url, self.bucket, path)
    }
}
