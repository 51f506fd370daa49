use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CredentialStore, StaffDirectory, StoreError};
use crate::db;
use crate::models::{StaffRecord, StaffRow};

/// Credential and staff-row access backed by the salon's Postgres database.
#[derive(Clone)]
pub struct PgStaffStore {
    pool: PgPool,
}

impl PgStaffStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_record(row: StaffRow) -> Result<StaffRecord, StoreError> {
    StaffRecord::try_from(row).map_err(StoreError::from)
}

#[async_trait]
impl CredentialStore for PgStaffStore {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<StaffRecord>, StoreError> {
        db::staff::authenticate(&self.pool, email, password)
            .await?
            .map(to_record)
            .transpose()
    }

    async fn set_credential(
        &self,
        staff_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<(), StoreError> {
        db::staff::set_credential(&self.pool, staff_id, email, password).await?;
        Ok(())
    }
}

#[async_trait]
impl StaffDirectory for PgStaffStore {
    async fn find_by_id(&self, staff_id: Uuid) -> Result<Option<StaffRecord>, StoreError> {
        db::staff::find_by_id(&self.pool, staff_id)
            .await?
            .map(to_record)
            .transpose()
    }

    async fn update_photo_url(
        &self,
        staff_id: Uuid,
        photo_url: Option<&str>,
    ) -> Result<(), StoreError> {
        let updated = db::staff::update_photo_url(&self.pool, staff_id, photo_url).await?;
        if updated == 0 {
            return Err(StoreError::from(format!("Staff member {staff_id} not found")));
        }
        Ok(())
    }
}
