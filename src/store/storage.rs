use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{ObjectStore, StoreError, UploadOptions};

/// Object storage client speaking the Supabase Storage REST dialect.
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: Option<String>,
}

impl HttpObjectStore {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build storage client: {e}"))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{path}", self.base_url)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.bearer_auth(&self.api_key).header("apikey", &self.api_key)
    }
}

/// Turns a non-2xx response into an error carrying a truncated body.
async fn check_status(resp: reqwest::Response, what: &str) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(512)
        .collect::<String>();
    Err(StoreError::from(format!("{what} failed with status {status}: {body}")))
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: bytes::Bytes,
        options: &UploadOptions,
    ) -> Result<String, StoreError> {
        let content_type = options
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");

        let req = self
            .authorized(self.client.post(self.object_url(bucket, key)))
            .header("cache-control", format!("max-age={}", options.cache_control))
            .header("x-upsert", options.upsert.to_string())
            .header("content-type", content_type)
            .body(bytes);

        let resp = check_status(req.send().await?, "Upload").await?;

        // Storage answers with `{"Key": "<bucket>/<path>"}`; the caller wants the path.
        let stored = resp
            .json::<UploadResponse>()
            .await
            .ok()
            .and_then(|r| r.key)
            .map(|k| {
                k.strip_prefix(&format!("{bucket}/"))
                    .map(str::to_string)
                    .unwrap_or(k)
            })
            .unwrap_or_else(|| key.to_string());

        tracing::debug!(bucket, path = %stored, "Object uploaded");
        Ok(stored)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StoreError> {
        let url = format!("{}/storage/v1/object/{bucket}", self.base_url);
        let req = self
            .authorized(self.client.delete(url))
            .json(&json!({ "prefixes": paths }));

        check_status(req.send().await?, "Remove").await?;
        Ok(())
    }
}
