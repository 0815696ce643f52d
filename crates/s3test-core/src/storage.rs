//! The content store behind an [`crate::InMemoryS3`].
//!
//! [`ObjectStore`] maps keys to [`StoredObject`]s and upload IDs to
//! [`MultipartUpload`] sessions. Both maps sit behind a single
//! [`parking_lot::Mutex`], so every operation is atomic with respect to
//! every other. Single-shot puts hash their body before the lock is taken,
//! and content reads happen on a cloned [`Arc`] after it is released.
//! Multipart completion is the exception: it concatenates and hashes the
//! parts while holding the lock, so assembly, verification and insert
//! happen as one step.
//!
//! The multipart half of the store lives in [`crate::multipart`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::trace;

use crate::checksums::{ContentHasher, declared_sha256, verify_content, verify_declared};
use crate::content::{ByteContent, ContentAt};
use crate::error::{S3TestError, S3TestResult};
use crate::sequence::{IdGenerator, SequentialIds};
use crate::state::multipart::MultipartUpload;
use crate::state::object::StoredObject;

/// Maps guarded by the store lock.
#[derive(Debug, Default)]
pub(crate) struct StoreInner {
    /// Committed objects keyed by object key.
    pub(crate) objects: HashMap<String, StoredObject>,
    /// In-flight multipart uploads keyed by upload ID.
    pub(crate) uploads: HashMap<String, MultipartUpload>,
}

/// Thread-safe in-memory object and upload store.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use bytes::Bytes;
/// use s3test_core::storage::ObjectStore;
///
/// let store = ObjectStore::default();
/// let obj = store
///     .put("hello.txt", Bytes::from("hello"), &HashMap::new())
///     .unwrap();
/// assert_eq!(obj.etag, "testetag0");
/// assert_eq!(store.get("hello.txt").unwrap().size(), 5);
/// ```
pub struct ObjectStore {
    pub(crate) inner: Mutex<StoreInner>,
    pub(crate) ids: Arc<dyn IdGenerator>,
}

impl fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ObjectStore")
            .field("objects_count", &inner.objects.len())
            .field("uploads_count", &inner.uploads.len())
            .field("ids", &self.ids)
            .finish()
    }
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new(Arc::new(SequentialIds::default()))
    }
}

impl ObjectStore {
    /// Create an empty store minting identifiers from `ids`.
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            ids,
        }
    }

    /// Look up an object. Missing keys yield `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.inner.lock().objects.get(key).cloned()
    }

    /// Verify and store a fully buffered body under `key`.
    ///
    /// Assigns a fresh entity tag and the current time, replacing any
    /// existing object wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`S3TestError::ChecksumMismatch`] if `metadata` declares a
    /// digest the body does not hash to. Nothing is stored in that case.
    pub fn put(
        &self,
        key: &str,
        data: Bytes,
        metadata: &HashMap<String, String>,
    ) -> S3TestResult<StoredObject> {
        let sha256 = verify_content(&data, metadata)?;
        Ok(self.commit(key, Arc::new(ByteContent::new(data)), sha256))
    }

    /// Store arbitrary content under `key` without any declared digest.
    ///
    /// The digest is computed by streaming over the content, so generated
    /// content of any size can be seeded.
    pub fn put_content(&self, key: &str, content: Arc<dyn ContentAt>) -> StoredObject {
        let sha256 = ContentHasher::hash_content(content.as_ref());
        self.commit(key, content, sha256)
    }

    /// Store content whose digest the caller already knows.
    ///
    /// Nothing is read from `content`, so this is the way to seed content
    /// too large to hash.
    pub fn put_content_with_sha256(
        &self,
        key: &str,
        content: Arc<dyn ContentAt>,
        sha256: impl Into<String>,
    ) -> StoredObject {
        self.commit(key, content, sha256.into())
    }

    fn commit(&self, key: &str, content: Arc<dyn ContentAt>, sha256: String) -> StoredObject {
        let object = StoredObject {
            key: key.to_owned(),
            content,
            sha256,
            last_modified: Utc::now(),
            etag: self.ids.next_etag(),
        };
        trace!(key, size = object.size(), etag = %object.etag, "stored object");
        self.inner
            .lock()
            .objects
            .insert(key.to_owned(), object.clone());
        object
    }

    /// Remove an object. Returns whether it existed.
    pub fn delete(&self, key: &str) -> bool {
        let removed = self.inner.lock().objects.remove(key).is_some();
        trace!(key, removed, "deleted object");
        removed
    }

    /// Duplicate `src` under `dst`.
    ///
    /// The new entry shares the source's content, digest, entity tag, and
    /// timestamp; the source is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`S3TestError::NoSuchKey`] if `src` does not exist.
    /// - [`S3TestError::ChecksumMismatch`] if `metadata` declares a digest
    ///   other than the source's.
    pub fn copy(
        &self,
        src: &str,
        dst: &str,
        metadata: &HashMap<String, String>,
    ) -> S3TestResult<StoredObject> {
        let mut inner = self.inner.lock();
        let source = inner
            .objects
            .get(src)
            .ok_or_else(|| S3TestError::NoSuchKey {
                key: src.to_owned(),
            })?;
        verify_declared(declared_sha256(metadata), &source.sha256)?;

        let copied = source.with_key(dst);
        inner.objects.insert(dst.to_owned(), copied.clone());
        trace!(src, dst, etag = %copied.etag, "copied object");
        Ok(copied)
    }

    /// All objects whose key starts with `prefix`, sorted by key.
    #[must_use]
    pub fn list_prefix(&self, prefix: &str) -> Vec<StoredObject> {
        let mut objects: Vec<StoredObject> = self
            .inner
            .lock()
            .objects
            .values()
            .filter(|o| o.key.starts_with(prefix))
            .cloned()
            .collect();
        objects.sort_by(|a, b| a.key.cmp(&b.key));
        objects
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().objects.len()
    }

    /// Returns true if no objects are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every object and every in-flight upload.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.objects.clear();
        inner.uploads.clear();
    }
}
