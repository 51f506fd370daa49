pub mod error;
pub mod guard;

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

pub use error::{AuthError, ProfileError, ValidationError};
pub use guard::{InFlight, InFlightGuard, OperationKind};

use crate::models::{MIN_PASSWORD_LEN, PasswordChangeRequest, PhotoUpload, StaffRecord};
use crate::session::SessionCache;
use crate::store::{CredentialStore, ObjectStore, StaffDirectory, UploadOptions};

pub const DEFAULT_PHOTO_BUCKET: &str = "funcionarios";

/// Stages of a password rotation, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationStage {
    Idle,
    Validating,
    Reauthenticating,
    Committing,
    Success,
    Failed,
}

/// Orchestrates login, photo changes and password rotation for a staff member.
pub struct ProfileService {
    credentials: Arc<dyn CredentialStore>,
    directory: Arc<dyn StaffDirectory>,
    objects: Arc<dyn ObjectStore>,
    session: SessionCache,
    in_flight: InFlightGuard,
    bucket: String,
}

impl ProfileService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        directory: Arc<dyn StaffDirectory>,
        objects: Arc<dyn ObjectStore>,
        session: SessionCache,
        bucket: &str,
    ) -> Self {
        Self {
            credentials,
            directory,
            objects,
            session,
            in_flight: InFlightGuard::new(),
            bucket: bucket.to_string(),
        }
    }

    pub fn in_flight(&self) -> &InFlightGuard {
        &self.in_flight
    }

    // ── Session ─────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> Result<StaffRecord, ProfileError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let staff = self
            .credentials
            .authenticate(email, password)
            .await
            .map_err(|e| {
                tracing::error!("Login lookup failed: {e}");
                ProfileError::Persistence(e.message)
            })?
            .ok_or(ProfileError::Auth(AuthError::InvalidCredentials))?;

        if !staff.active {
            tracing::info!(staff_id = %staff.id, "Login refused for inactive staff member");
            return Err(AuthError::Inactive.into());
        }

        self.session.save(&staff).await.map_err(ProfileError::Cache)?;

        tracing::info!(staff_id = %staff.id, role = %staff.role, "Staff member logged in");
        Ok(staff)
    }

    pub async fn logout(&self) -> Result<(), ProfileError> {
        self.session.clear().await.map_err(ProfileError::Cache)?;
        tracing::info!("Session cleared");
        Ok(())
    }

    /// `None` means nobody is logged in.
    pub async fn current(&self) -> Option<StaffRecord> {
        self.session.load().await
    }

    /// Re-reads the authoritative row and overwrites the cache with it, as long as
    /// the session still belongs to `staff`.
    pub async fn refresh(&self, staff: &StaffRecord) -> Result<StaffRecord, ProfileError> {
        let fresh = self
            .directory
            .find_by_id(staff.id)
            .await
            .map_err(|e| ProfileError::Persistence(e.message))?
            .ok_or_else(|| ProfileError::Persistence(format!("Staff member {} not found", staff.id)))?;

        if !fresh.active {
            self.session.clear().await.map_err(ProfileError::Cache)?;
            return Err(AuthError::Inactive.into());
        }

        let replacement = fresh.clone();
        let cached = self
            .session
            .update_if_current(staff.id, move |cached| *cached = replacement)
            .await
            .map_err(ProfileError::Cache)?;
        if cached.is_none() {
            tracing::debug!(staff_id = %staff.id, "Session ended during refresh, cache left alone");
        }
        Ok(fresh)
    }

    // ── Photo ───────────────────────────────────────────────────

    pub async fn replace_photo(
        &self,
        staff: &StaffRecord,
        file: Option<PhotoUpload>,
    ) -> Result<StaffRecord, ProfileError> {
        let file = file
            .filter(|f| !f.bytes.is_empty())
            .ok_or(ProfileError::Validation(ValidationError::MissingFile))?;

        let _slot = self.begin(staff.id, OperationKind::Photo)?;

        let key = object_key(staff.id, &file.extension());
        let options = UploadOptions {
            content_type: file.content_type.clone(),
            ..UploadOptions::default()
        };

        let path = self
            .objects
            .upload(&self.bucket, &key, file.bytes, &options)
            .await
            .map_err(|e| {
                tracing::warn!(staff_id = %staff.id, "Photo upload failed: {e}");
                ProfileError::Upload(e.message)
            })?;

        let url = self.objects.public_url(&self.bucket, &path);

        if let Err(e) = self.directory.update_photo_url(staff.id, Some(&url)).await {
            tracing::warn!(
                staff_id = %staff.id,
                bucket = %self.bucket,
                orphan = %path,
                "Photo uploaded but record update failed: {e}"
            );
            return Err(ProfileError::Persistence(e.message));
        }

        let updated = self.store_photo_url(staff, Some(url)).await;

        tracing::info!(staff_id = %staff.id, path = %path, "Profile photo replaced");
        Ok(updated)
    }

    /// Detaches the photo from the record. The blob itself is left in storage.
    pub async fn remove_photo(&self, staff: &StaffRecord) -> Result<StaffRecord, ProfileError> {
        let _slot = self.begin(staff.id, OperationKind::Photo)?;

        self.directory
            .update_photo_url(staff.id, None)
            .await
            .map_err(|e| {
                tracing::warn!(staff_id = %staff.id, "Photo removal failed: {e}");
                ProfileError::Persistence(e.message)
            })?;

        let updated = self.store_photo_url(staff, None).await;

        tracing::info!(staff_id = %staff.id, "Profile photo removed");
        Ok(updated)
    }

    // ── Password ────────────────────────────────────────────────

    /// Validates, re-authenticates with the current password, then commits.
    /// On success the request's fields are cleared; on failure they are left as typed.
    pub async fn rotate_password(
        &self,
        staff: &StaffRecord,
        request: &mut PasswordChangeRequest,
    ) -> Result<(), ProfileError> {
        let _slot = self.begin(staff.id, OperationKind::Password)?;

        let mut stage = RotationStage::Idle;
        let result = self.run_rotation(staff, request, &mut stage).await;

        match &result {
            Ok(()) => {
                advance(&mut stage, RotationStage::Success, staff.id);
                request.clear();
                tracing::info!(staff_id = %staff.id, "Password changed");
            }
            Err(e) => {
                tracing::info!(staff_id = %staff.id, failed_at = ?stage, "Password change failed: {e}");
                advance(&mut stage, RotationStage::Failed, staff.id);
            }
        }

        result
    }

    async fn run_rotation(
        &self,
        staff: &StaffRecord,
        request: &PasswordChangeRequest,
        stage: &mut RotationStage,
    ) -> Result<(), ProfileError> {
        advance(stage, RotationStage::Validating, staff.id);
        validate_password_change(request)?;

        advance(stage, RotationStage::Reauthenticating, staff.id);
        let reauthenticated = match self
            .credentials
            .authenticate(&staff.email, &request.current_password)
            .await
        {
            Ok(found) => found.is_some_and(|s| s.id == staff.id),
            Err(e) => {
                tracing::warn!(staff_id = %staff.id, "Re-authentication errored: {e}");
                false
            }
        };
        if !reauthenticated {
            return Err(AuthError::WrongCurrentPassword.into());
        }

        advance(stage, RotationStage::Committing, staff.id);
        self.credentials
            .set_credential(staff.id, &staff.email, &request.new_password)
            .await
            .map_err(|e| ProfileError::Persistence(e.message))
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn begin(&self, staff_id: Uuid, kind: OperationKind) -> Result<InFlight, ProfileError> {
        self.in_flight.try_begin(staff_id, kind).ok_or_else(|| {
            tracing::debug!(%staff_id, ?kind, "Rejected concurrent operation");
            ProfileError::InProgress(kind)
        })
    }

    /// The remote row is already updated. The cache only follows when the session
    /// still belongs to this staff member; a logout in the meantime stays a logout.
    async fn store_photo_url(&self, staff: &StaffRecord, photo_url: Option<String>) -> StaffRecord {
        let new_url = photo_url.clone();
        match self
            .session
            .update_if_current(staff.id, move |cached| cached.photo_url = new_url)
            .await
        {
            Ok(Some(cached)) => cached,
            Ok(None) => {
                tracing::debug!(staff_id = %staff.id, "Session ended during photo update, cache left alone");
                staff.with_photo_url(photo_url)
            }
            Err(e) => {
                tracing::warn!(staff_id = %staff.id, "Session cache not updated: {e}");
                staff.with_photo_url(photo_url)
            }
        }
    }
}

/// Checks the request before any backend is contacted. Mismatch wins over length.
pub fn validate_password_change(request: &PasswordChangeRequest) -> Result<(), ValidationError> {
    if request.new_password != request.confirm_password {
        return Err(ValidationError::Mismatch);
    }
    if request.new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort);
    }
    Ok(())
}

/// `<staff_id>-<unix millis>-<random>.<ext>`
pub fn object_key(staff_id: Uuid, extension: &str) -> String {
    let suffix: u32 = rand::random();
    format!(
        "{staff_id}-{}-{suffix:08x}.{extension}",
        Utc::now().timestamp_millis()
    )
}

fn advance(stage: &mut RotationStage, next: RotationStage, staff_id: Uuid) {
    tracing::debug!(%staff_id, from = ?*stage, to = ?next, "Password rotation");
    *stage = next;
}
