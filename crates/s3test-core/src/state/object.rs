//! Committed object records.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use s3test_model::types::Object;

use crate::content::{ContentAt, ObjectBody};
use crate::error::S3TestResult;
use crate::range::ByteRange;

/// An object committed to the store.
///
/// Cloning is cheap: the content is shared, so a clone taken under the store
/// lock can be read from after the lock is released.
#[derive(Clone)]
pub struct StoredObject {
    /// The object key.
    pub key: String,
    /// The object body.
    pub content: Arc<dyn ContentAt>,
    /// Lowercase hex SHA-256 of the full content.
    pub sha256: String,
    /// When the object was written.
    pub last_modified: DateTime<Utc>,
    /// Opaque version token, unique per write.
    pub etag: String,
}

impl fmt::Debug for StoredObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredObject")
            .field("key", &self.key)
            .field("size", &self.size())
            .field("sha256", &self.sha256)
            .field("last_modified", &self.last_modified)
            .field("etag", &self.etag)
            .finish()
    }
}

impl StoredObject {
    /// Size of the content in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.content.size()
    }

    /// A lazy reader over `range` of the content, or all of it when `None`.
    #[must_use]
    pub fn body(&self, range: Option<ByteRange>) -> ObjectBody {
        let content = Arc::clone(&self.content);
        match range {
            Some(r) => ObjectBody::new(content, r.start, r.len()),
            None => ObjectBody::full(content),
        }
    }

    /// Read `range` of the content, or all of it when `None`, into memory.
    ///
    /// # Errors
    ///
    /// Returns [`crate::S3TestError::Internal`] if the window cannot be
    /// materialized.
    pub fn read(&self, range: Option<ByteRange>) -> S3TestResult<Bytes> {
        Ok(self.body(range).read_all().map_err(anyhow::Error::from)?)
    }

    /// The listing entry for this object.
    #[must_use]
    pub fn to_listing(&self) -> Object {
        Object {
            key: self.key.clone(),
            size: self.size(),
            last_modified: self.last_modified,
            e_tag: self.etag.clone(),
        }
    }

    /// The same record under a different key.
    #[must_use]
    pub fn with_key(&self, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..self.clone()
        }
    }
}
