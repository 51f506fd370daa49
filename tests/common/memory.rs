//! In-process collaborators for the test suite. They keep everything in maps,
//! count calls, can be told to fail and can be held mid-call.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tokio::sync::Notify;
use uuid::Uuid;

use salon_staff::models::StaffRecord;
use salon_staff::store::{CredentialStore, ObjectStore, StaffDirectory, StoreError, UploadOptions};

struct Account {
    record: StaffRecord,
    password: String,
}

#[derive(Default)]
pub struct MemoryStaffStore {
    accounts: DashMap<Uuid, Account>,
    authenticate_calls: AtomicUsize,
    set_credential_calls: AtomicUsize,
    update_calls: AtomicUsize,
    fail_authenticate: AtomicBool,
    fail_set_credential: AtomicBool,
    fail_update: AtomicBool,
    auth_gate: Mutex<Option<Arc<Notify>>>,
}

impl MemoryStaffStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: StaffRecord, password: &str) {
        self.accounts.insert(
            record.id,
            Account {
                record,
                password: password.to_string(),
            },
        );
    }

    pub fn record(&self, staff_id: Uuid) -> Option<StaffRecord> {
        self.accounts.get(&staff_id).map(|a| a.record.clone())
    }

    pub fn password(&self, staff_id: Uuid) -> Option<String> {
        self.accounts.get(&staff_id).map(|a| a.password.clone())
    }

    pub fn authenticate_calls(&self) -> usize {
        self.authenticate_calls.load(Ordering::SeqCst)
    }

    pub fn set_credential_calls(&self) -> usize {
        self.set_credential_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn fail_authenticate(&self, fail: bool) {
        self.fail_authenticate.store(fail, Ordering::SeqCst);
    }

    pub fn fail_set_credential(&self, fail: bool) {
        self.fail_set_credential.store(fail, Ordering::SeqCst);
    }

    pub fn fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    /// Makes `authenticate` wait until the returned handle is notified.
    pub fn hold_authentication(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.auth_gate.lock().unwrap_or_else(|e| e.into_inner()) = Some(gate.clone());
        gate
    }

    fn gate(&self) -> Option<Arc<Notify>> {
        self.auth_gate
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryStaffStore {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<StaffRecord>, StoreError> {
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = self.gate() {
            gate.notified().await;
        }

        if self.fail_authenticate.load(Ordering::SeqCst) {
            return Err(StoreError::from("authenticate unavailable"));
        }

        Ok(self
            .accounts
            .iter()
            .find(|a| a.record.email == email && a.password == password)
            .map(|a| a.record.clone()))
    }

    async fn set_credential(
        &self,
        staff_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<(), StoreError> {
        self.set_credential_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_set_credential.load(Ordering::SeqCst) {
            return Err(StoreError::from("set_credential unavailable"));
        }

        let mut account = self
            .accounts
            .get_mut(&staff_id)
            .ok_or_else(|| StoreError::from(format!("Staff member {staff_id} not found")))?;
        account.record.email = email.to_string();
        account.password = password.to_string();
        Ok(())
    }
}

#[async_trait]
impl StaffDirectory for MemoryStaffStore {
    async fn find_by_id(&self, staff_id: Uuid) -> Result<Option<StaffRecord>, StoreError> {
        Ok(self.record(staff_id))
    }

    async fn update_photo_url(
        &self,
        staff_id: Uuid,
        photo_url: Option<&str>,
    ) -> Result<(), StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_update.load(Ordering::SeqCst) {
            return Err(StoreError::from("update unavailable"));
        }

        let mut account = self
            .accounts
            .get_mut(&staff_id)
            .ok_or_else(|| StoreError::from(format!("Staff member {staff_id} not found")))?;
        account.record.photo_url = photo_url.map(str::to_string);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: DashMap<(String, String), Bytes>,
    upload_calls: AtomicUsize,
    remove_calls: AtomicUsize,
    fail_upload: AtomicBool,
    upload_gate: Mutex<Option<Arc<Notify>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, bucket: &str, path: &str) -> bool {
        self.objects
            .contains_key(&(bucket.to_string(), path.to_string()))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn remove_calls(&self) -> usize {
        self.remove_calls.load(Ordering::SeqCst)
    }

    pub fn fail_upload(&self, fail: bool) {
        self.fail_upload.store(fail, Ordering::SeqCst);
    }

    /// Makes the next `upload` wait until the returned handle is notified.
    pub fn hold_uploads(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.upload_gate.lock().unwrap_or_else(|e| e.into_inner()) = Some(gate.clone());
        gate
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        options: &UploadOptions,
    ) -> Result<String, StoreError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self
            .upload_gate
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(StoreError::from("upload unavailable"));
        }

        let id = (bucket.to_string(), key.to_string());
        if !options.upsert && self.objects.contains_key(&id) {
            return Err(StoreError::from(format!("Object {bucket}/{key} already exists")));
        }
        self.objects.insert(id, bytes);
        Ok(key.to_string())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://storage.test/{bucket}/{path}")
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StoreError> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        for path in paths {
            self.objects.remove(&(bucket.to_string(), path.clone()));
        }
        Ok(())
    }
}
