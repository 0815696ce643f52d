//! Multipart upload assembly on top of [`ObjectStore`].
//!
//! A session moves from active to completed or aborted. Completion checks
//! the requested part list against what was buffered (key, count, strict
//! ordering, presence), concatenates the parts in list order, verifies the
//! digest captured at creation, and commits the result. Every check runs
//! before anything is mutated, so a failed completion leaves the session
//! in place for a retry or an abort.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use chrono::Utc;
use tracing::{debug, trace};

use crate::checksums::verify_content;
use crate::content::ByteContent;
use crate::error::{S3TestError, S3TestResult};
use crate::range::resolve_range;
use crate::state::multipart::MultipartUpload;
use crate::state::object::StoredObject;
use crate::storage::ObjectStore;

impl ObjectStore {
    /// Start a multipart upload for `key`.
    ///
    /// `metadata` is captured as-is; a declared digest in it is checked
    /// against the assembled object on completion.
    pub fn initiate(&self, key: &str, metadata: HashMap<String, String>) -> MultipartUpload {
        let upload = MultipartUpload::new(self.ids.next_upload_id(), key.to_owned(), metadata);
        self.inner
            .lock()
            .uploads
            .insert(upload.upload_id.clone(), upload.clone());
        debug!(upload_id = %upload.upload_id, key, "initiated multipart upload");
        upload
    }

    /// Buffer `data` as part `part_number`, replacing any earlier upload of
    /// the same number. Returns the session's entity tag.
    ///
    /// # Errors
    ///
    /// Returns [`S3TestError::NoSuchUpload`] if the session does not exist.
    pub fn upload_part(
        &self,
        upload_id: &str,
        part_number: u32,
        data: Bytes,
    ) -> S3TestResult<String> {
        let mut inner = self.inner.lock();
        let upload = inner
            .uploads
            .get_mut(upload_id)
            .ok_or_else(|| S3TestError::NoSuchUpload {
                upload_id: upload_id.to_owned(),
            })?;
        trace!(upload_id, part_number, size = data.len(), "buffered part");
        upload.put_part(part_number, data);
        Ok(upload.etag.clone())
    }

    /// Buffer a window of an existing object as part `part_number`.
    ///
    /// `range` follows the byte-range syntax of [`crate::range`]; an absent
    /// or unusable range copies the whole source. The source bytes are read
    /// without holding the store lock.
    ///
    /// # Errors
    ///
    /// - [`S3TestError::NoSuchKey`] if `source_key` does not exist.
    /// - [`S3TestError::NoSuchUpload`] if the session does not exist by the
    ///   time the bytes are ready.
    pub fn upload_part_copy(
        &self,
        upload_id: &str,
        part_number: u32,
        source_key: &str,
        range: Option<&str>,
    ) -> S3TestResult<String> {
        let source = self.get(source_key).ok_or_else(|| S3TestError::NoSuchKey {
            key: source_key.to_owned(),
        })?;
        let data = source.read(resolve_range(range, source.size()))?;
        self.upload_part(upload_id, part_number, data)
    }

    /// Assemble the listed parts into the session's object.
    ///
    /// `part_numbers` is the caller's part list in the order given.
    ///
    /// # Errors
    ///
    /// - [`S3TestError::NoSuchUpload`] if the session does not exist.
    /// - [`S3TestError::KeyMismatch`] if `key` differs from the session key.
    /// - [`S3TestError::PartCountMismatch`] if the list length differs from
    ///   the number of buffered parts.
    /// - [`S3TestError::InvalidPartOrder`] if the list is not strictly
    ///   increasing.
    /// - [`S3TestError::InvalidPart`] if a listed part was never uploaded.
    /// - [`S3TestError::ChecksumMismatch`] if the assembled bytes do not
    ///   match the digest declared at creation.
    pub fn complete(
        &self,
        upload_id: &str,
        key: &str,
        part_numbers: &[i64],
    ) -> S3TestResult<StoredObject> {
        let mut inner = self.inner.lock();
        let upload = inner
            .uploads
            .get(upload_id)
            .ok_or_else(|| S3TestError::NoSuchUpload {
                upload_id: upload_id.to_owned(),
            })?;

        if upload.key != key {
            return Err(S3TestError::KeyMismatch {
                expected: upload.key.clone(),
                actual: key.to_owned(),
            });
        }
        if part_numbers.len() != upload.parts_count() {
            return Err(S3TestError::PartCountMismatch {
                expected: upload.parts_count(),
                actual: part_numbers.len(),
            });
        }

        let mut parts: Vec<&Bytes> = Vec::with_capacity(part_numbers.len());
        let mut previous: Option<i64> = None;
        for &part_number in part_numbers {
            if let Some(previous) = previous.filter(|&p| part_number <= p) {
                return Err(S3TestError::InvalidPartOrder {
                    part_number,
                    previous,
                });
            }
            previous = Some(part_number);
            let part = u32::try_from(part_number)
                .ok()
                .and_then(|n| upload.get_part(n))
                .ok_or(S3TestError::InvalidPart { part_number })?;
            parts.push(part);
        }

        let mut buf = BytesMut::with_capacity(parts.iter().map(|p| p.len()).sum());
        for part in parts {
            buf.extend_from_slice(part);
        }
        let data = buf.freeze();
        let sha256 = verify_content(&data, &upload.metadata)?;

        let object = StoredObject {
            key: key.to_owned(),
            content: Arc::new(ByteContent::new(data)),
            sha256,
            last_modified: Utc::now(),
            etag: upload.etag.clone(),
        };
        inner.objects.insert(key.to_owned(), object.clone());
        inner.uploads.remove(upload_id);
        debug!(
            upload_id,
            key,
            parts = part_numbers.len(),
            size = object.size(),
            "completed multipart upload"
        );
        Ok(object)
    }

    /// Discard a session and its buffered parts. Returns whether the
    /// session existed.
    pub fn abort(&self, upload_id: &str) -> bool {
        let existed = self.inner.lock().uploads.remove(upload_id).is_some();
        debug!(upload_id, existed, "aborted multipart upload");
        existed
    }

    /// A snapshot of a session, if it is still active.
    #[must_use]
    pub fn upload(&self, upload_id: &str) -> Option<MultipartUpload> {
        self.inner.lock().uploads.get(upload_id).cloned()
    }

    /// IDs of every active session, sorted.
    #[must_use]
    pub fn active_uploads(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.inner.lock().uploads.keys().cloned().collect();
        ids.sort();
        ids
    }
}
