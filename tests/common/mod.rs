#![allow(dead_code)]

pub mod memory;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;
use uuid::Uuid;

use salon_staff::models::{StaffRecord, StaffRole};
use salon_staff::profile::ProfileService;
use salon_staff::session::SessionCache;
use memory::{MemoryObjectStore, MemoryStaffStore};

pub const BUCKET: &str = "funcionarios";
pub const EMAIL: &str = "ana@salao.test";
pub const PASSWORD: &str = "segredo123";

pub fn staff_record() -> StaffRecord {
    StaffRecord {
        id: Uuid::now_v7(),
        name: "Ana Souza".to_string(),
        email: EMAIL.to_string(),
        role: StaffRole::Hairdresser,
        active: true,
        photo_url: Some("https://storage.test/funcionarios/old.jpg".to_string()),
        phone: "+55 11 91234-5678".to_string(),
    }
}

/// A profile service wired to in-memory collaborators and a temporary cache file.
pub struct TestContext {
    pub service: ProfileService,
    pub staff_store: Arc<MemoryStaffStore>,
    pub objects: Arc<MemoryObjectStore>,
    pub staff: StaffRecord,
    pub session_path: PathBuf,
    _dir: TempDir,
}

impl TestContext {
    /// An independent handle on the same cache file, for inspecting what the service wrote.
    pub fn cache(&self) -> SessionCache {
        SessionCache::new(&self.session_path)
    }

    pub async fn cached(&self) -> Option<StaffRecord> {
        self.cache().load().await
    }
}

pub fn context() -> TestContext {
    let dir = tempfile::tempdir().expect("tempdir");
    let session_path = dir.path().join("session.json");

    let staff = staff_record();
    let staff_store = Arc::new(MemoryStaffStore::new());
    staff_store.insert(staff.clone(), PASSWORD);
    let objects = Arc::new(MemoryObjectStore::new());

    let service = ProfileService::new(
        staff_store.clone(),
        staff_store.clone(),
        objects.clone(),
        SessionCache::new(&session_path),
        BUCKET,
    );

    TestContext {
        service,
        staff_store,
        objects,
        staff,
        session_path,
        _dir: dir,
    }
}

/// Same as [`context`] with the staff member already logged in.
pub async fn logged_in() -> TestContext {
    let ctx = context();
    ctx.service
        .login(EMAIL, PASSWORD)
        .await
        .expect("login failed");
    ctx
}

/// A running test server backed by in-memory collaborators.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub staff_store: Arc<MemoryStaffStore>,
    pub objects: Arc<MemoryObjectStore>,
    pub staff: StaffRecord,
    pub session_path: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/session"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Log in with the seeded staff member and assert success.
    pub async fn bootstrap(&self) -> Value {
        let (body, status) = self.login(EMAIL, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "bootstrap login failed: {body}");
        body
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put_photo(&self, file_name: &str, bytes: Vec<u8>) -> (Value, StatusCode) {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("image/png")
            .expect("valid mime");
        let form = reqwest::multipart::Form::new().part("photo", part);
        let resp = self
            .client
            .put(self.url("/api/v1/profile/photo"))
            .multipart(form)
            .send()
            .await
            .expect("photo request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub const MAX_PHOTO_SIZE: usize = 1024;

pub async fn spawn_app() -> TestApp {
    let ctx = context();
    let TestContext {
        service,
        staff_store,
        objects,
        staff,
        session_path,
        _dir,
    } = ctx;

    let app = salon_staff::build_app(service, MAX_PHOTO_SIZE);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        staff_store,
        objects,
        staff,
        session_path,
        _dir,
    }
}
