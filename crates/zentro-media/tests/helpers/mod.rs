//! Test doubles: in-memory object storage and metadata store, with
//! failure-injection switches for exercising the partial-write windows.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use zentro_core::models::{NewPropertyImage, PropertyImage};
use zentro_core::{AppError, StorageBackend};
use zentro_db::PropertyImageStore;
use zentro_storage::{ObjectStorage, StorageError, StorageResult, UploadSettings};

/// In-memory object storage double.
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    pub fail_uploads: AtomicBool,
    pub fail_removes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn object_key(bucket: &str, key: &str) -> String {
        format!("{}/{}", bucket, key)
    }

    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .lock()
            .unwrap()
            .contains_key(&Self::object_key(bucket, key))
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        _content_type: &str,
        data: Vec<u8>,
        settings: &UploadSettings,
    ) -> StorageResult<()> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError(
                "injected upload failure".to_string(),
            ));
        }
        let mut objects = self.objects.lock().unwrap();
        let object_key = Self::object_key(bucket, key);
        if !settings.upsert && objects.contains_key(&object_key) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        objects.insert(object_key, data);
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("https://cdn.test/{}/{}", bucket, key)
    }

    async fn remove(&self, bucket: &str, keys: &[String]) -> StorageResult<()> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError(
                "injected remove failure".to_string(),
            ));
        }
        let mut objects = self.objects.lock().unwrap();
        for key in keys {
            objects.remove(&Self::object_key(bucket, key));
        }
        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        Ok(self.contains(bucket, key))
    }

    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&Self::object_key(bucket, key))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// In-memory metadata store double.
#[derive(Default)]
pub struct MemoryImageStore {
    rows: Mutex<Vec<PropertyImage>>,
    insert_attempts: AtomicUsize,
    pub fail_inserts: AtomicBool,
    pub fail_deletes: AtomicBool,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many inserts were attempted, successful or not.
    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl PropertyImageStore for MemoryImageStore {
    async fn insert(&self, image: NewPropertyImage) -> Result<PropertyImage, AppError> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Internal("injected insert failure".to_string()));
        }
        let row = PropertyImage {
            id: Uuid::new_v4(),
            property_id: image.property_id,
            storage_path: image.storage_path,
            file_name: image.file_name,
            file_size: image.file_size,
            mime_type: image.mime_type,
            alt_text: image.alt_text,
            is_primary: image.is_primary,
            display_order: image.display_order,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_for_property(&self, property_id: Uuid) -> Result<Vec<PropertyImage>, AppError> {
        let mut rows: Vec<PropertyImage> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.property_id == property_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order within equal display_order,
        // mirroring the repository's created_at tie-break.
        rows.sort_by_key(|r| r.display_order);
        Ok(rows)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<PropertyImage>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("injected delete failure".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }
}
