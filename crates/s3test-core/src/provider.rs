//! The in-memory S3 client.
//!
//! [`InMemoryS3`] owns the configuration, the [`ObjectStore`], the injected
//! fault slot, and per-operation call counters. Individual operations are
//! implemented in the `ops` submodules; this module holds construction,
//! the shared pre-flight step every operation runs, and the fixture helpers
//! tests use to seed and inspect state directly.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use parking_lot::RwLock;
use s3test_model::S3Operation;
use tracing::info;

use crate::config::S3TestConfig;
use crate::content::{ByteContent, ContentAt};
use crate::error::{InjectedFault, S3TestError, S3TestResult};
use crate::sequence::IdGenerator;
use crate::state::object::StoredObject;
use crate::storage::ObjectStore;

/// An S3 client whose bucket lives in process memory.
///
/// `InMemoryS3` is `Send + Sync`; share it across threads or tasks in an
/// [`Arc`].
///
/// # Examples
///
/// ```
/// use s3test_core::{InMemoryS3, S3TestConfig};
/// use s3test_model::S3Operation;
/// use s3test_model::input::HeadObjectInput;
///
/// let s3 = InMemoryS3::new(S3TestConfig::default());
/// s3.set_file("a.txt", "alpha");
///
/// let head = s3
///     .head_object(HeadObjectInput {
///         bucket: "s3test".into(),
///         key: "a.txt".into(),
///     })
///     .unwrap();
/// assert_eq!(head.content_length, 5);
/// assert_eq!(s3.api_count(S3Operation::HeadObject), 1);
/// ```
#[derive(Debug)]
pub struct InMemoryS3 {
    /// Objects and multipart sessions.
    pub(crate) store: Arc<ObjectStore>,
    /// Client configuration.
    pub(crate) config: Arc<S3TestConfig>,
    /// Fault returned by every operation while set.
    pub(crate) fault: RwLock<Option<InjectedFault>>,
    /// Invocation counts per operation, failed calls included.
    pub(crate) counters: DashMap<S3Operation, u64>,
}

impl Default for InMemoryS3 {
    fn default() -> Self {
        Self::new(S3TestConfig::default())
    }
}

impl InMemoryS3 {
    /// Create a client with sequential identifiers.
    #[must_use]
    pub fn new(config: S3TestConfig) -> Self {
        Self::with_store(config, ObjectStore::default())
    }

    /// Create a client minting identifiers from `ids`.
    #[must_use]
    pub fn with_ids(config: S3TestConfig, ids: Arc<dyn IdGenerator>) -> Self {
        Self::with_store(config, ObjectStore::new(ids))
    }

    fn with_store(config: S3TestConfig, store: ObjectStore) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            fault: RwLock::new(None),
            counters: DashMap::new(),
        }
    }

    /// Returns a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &S3TestConfig {
        &self.config
    }

    /// Returns a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// The maximum number of retries callers are permitted.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.config.max_retries
    }

    // -----------------------------------------------------------------------
    // Fault injection and instrumentation
    // -----------------------------------------------------------------------

    /// Install or clear the fault every operation returns.
    pub fn set_fault(&self, fault: Option<InjectedFault>) {
        match &fault {
            Some(f) => info!(code = %f.code, message = %f.message, "installed fault"),
            None => info!("cleared fault"),
        }
        *self.fault.write() = fault;
    }

    /// The currently installed fault.
    #[must_use]
    pub fn fault(&self) -> Option<InjectedFault> {
        self.fault.read().clone()
    }

    /// How many times `op` has been invoked, failed calls included.
    #[must_use]
    pub fn api_count(&self, op: S3Operation) -> u64 {
        self.counters.get(&op).map_or(0, |c| *c)
    }

    /// A snapshot of the call counter of every operation, zeros included.
    #[must_use]
    pub fn api_counts(&self) -> HashMap<S3Operation, u64> {
        S3Operation::ALL
            .into_iter()
            .map(|op| (op, self.api_count(op)))
            .collect()
    }

    /// Drop all objects, uploads, and call counts. The configuration and
    /// any installed fault are kept.
    pub fn reset(&self) {
        self.store.reset();
        self.counters.clear();
    }

    /// Steps shared by every operation: count the call, fail with the
    /// injected fault if one is installed, then check the bucket.
    pub(crate) fn begin(&self, op: S3Operation, bucket: &str) -> S3TestResult<()> {
        *self.counters.entry(op).or_insert(0) += 1;

        if let Some(fault) = self.fault.read().clone() {
            return Err(S3TestError::Injected(fault));
        }

        if bucket != self.config.bucket {
            return Err(S3TestError::BucketMismatch {
                expected: self.config.bucket.clone(),
                actual: bucket.to_owned(),
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Fixture helpers
    // -----------------------------------------------------------------------

    /// Store `data` under `key`, bypassing the operation surface.
    pub fn set_file(&self, key: &str, data: impl Into<Bytes>) -> StoredObject {
        self.store
            .put_content(key, Arc::new(ByteContent::new(data.into())))
    }

    /// Store arbitrary content under `key`, bypassing the operation surface.
    pub fn set_file_content(&self, key: &str, content: Arc<dyn ContentAt>) -> StoredObject {
        self.store.put_content(key, content)
    }

    /// Store arbitrary content under `key` with a known digest, without
    /// reading any of it.
    pub fn set_file_content_with_sha256(
        &self,
        key: &str,
        content: Arc<dyn ContentAt>,
        sha256: impl Into<String>,
    ) -> StoredObject {
        self.store.put_content_with_sha256(key, content, sha256)
    }

    /// The stored record for `key`, if any.
    #[must_use]
    pub fn get_file(&self, key: &str) -> Option<StoredObject> {
        self.store.get(key)
    }

    /// The full content of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`S3TestError::NoSuchKey`] if the key does not exist.
    pub fn get_file_bytes(&self, key: &str) -> S3TestResult<Bytes> {
        self.store
            .get(key)
            .ok_or_else(|| S3TestError::NoSuchKey {
                key: key.to_owned(),
            })?
            .read(None)
    }

    /// IDs of every multipart upload still in progress.
    #[must_use]
    pub fn active_uploads(&self) -> Vec<String> {
        self.store.active_uploads()
    }
}
