use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::models::StaffRecord;

/// Local, non-authoritative copy of the logged-in staff record, persisted as JSON.
pub struct SessionCache {
    path: PathBuf,
    /// Serializes every write to the entry.
    write_lock: Mutex<()>,
}

impl SessionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable entries count as "not authenticated".
    pub async fn load(&self) -> Option<StaffRecord> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read session cache {}: {e}", self.path.display());
                return None;
            }
        };

        match serde_json::from_slice::<StaffRecord>(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Discarding corrupt session cache {}: {e}", self.path.display());
                None
            }
        }
    }

    pub async fn save(&self, record: &StaffRecord) -> Result<(), String> {
        let _lock = self.write_lock.lock().await;
        self.write(record).await
    }

    /// Applies `change` to the cached record only while the session still belongs
    /// to `staff_id`. Returns the stored record, or `None` when the session ended
    /// or now belongs to someone else.
    pub async fn update_if_current<F>(
        &self,
        staff_id: uuid::Uuid,
        change: F,
    ) -> Result<Option<StaffRecord>, String>
    where
        F: FnOnce(&mut StaffRecord),
    {
        let _lock = self.write_lock.lock().await;

        let Some(mut record) = self.load().await.filter(|r| r.id == staff_id) else {
            return Ok(None);
        };

        change(&mut record);
        self.write(&record).await?;
        Ok(Some(record))
    }

    pub async fn clear(&self) -> Result<(), String> {
        let _lock = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("Failed to clear session: {e}")),
        }
    }

    async fn write(&self, record: &StaffRecord) -> Result<(), String> {
        let json = serde_json::to_vec(record)
            .map_err(|e| format!("Failed to serialize session: {e}"))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| format!("Failed to create session directory: {e}"))?;
        }

        // Sibling file first, then renamed over the entry.
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| format!("Failed to write session: {e}"))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| format!("Failed to store session: {e}"))?;

        tracing::debug!(staff_id = %record.id, "Session cache saved");
        Ok(())
    }
}
