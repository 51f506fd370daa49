pub mod postgres;
pub mod storage;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::StaffRecord;

/// Failure reported by a collaborator. The profile service decides what it means.
#[derive(Debug, Clone)]
pub struct StoreError {
    pub message: String,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for StoreError {
    fn from(s: String) -> Self {
        StoreError { message: s }
    }
}

impl From<&str> for StoreError {
    fn from(s: &str) -> Self {
        StoreError {
            message: s.to_string(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError {
            message: format!("Database error: {err}"),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError {
            message: format!("Storage request failed: {err}"),
        }
    }
}

/// Verifies email/password pairs and binds new credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// `Ok(None)` means the pair did not match.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<StaffRecord>, StoreError>;

    async fn set_credential(
        &self,
        staff_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<(), StoreError>;
}

/// Authoritative staff rows.
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    async fn find_by_id(&self, staff_id: Uuid) -> Result<Option<StaffRecord>, StoreError>;

    async fn update_photo_url(
        &self,
        staff_id: Uuid,
        photo_url: Option<&str>,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadOptions {
    /// Seconds, sent as `max-age`.
    pub cache_control: String,
    /// Overwrite an existing object under the same key instead of failing.
    pub upsert: bool,
    pub content_type: Option<String>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            cache_control: "3600".to_string(),
            upsert: true,
            content_type: None,
        }
    }
}

/// Blob storage for profile photos.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the stored object's path inside the bucket.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: bytes::Bytes,
        options: &UploadOptions,
    ) -> Result<String, StoreError>;

    /// Pure derivation; does not check that the object exists.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StoreError>;
}
