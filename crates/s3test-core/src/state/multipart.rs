//! Multipart upload session state.
//!
//! A [`MultipartUpload`] lives from `CreateMultipartUpload` until it is
//! completed or aborted; both end states are represented by the session
//! no longer existing. Parts may arrive in any order and a re-uploaded part
//! number replaces the earlier bytes.

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;

use crate::sequence::multipart_etag;

/// An in-progress multipart upload.
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    /// Unique identifier for this upload.
    pub upload_id: String,
    /// The object key that this upload will create.
    pub key: String,
    /// The entity tag the assembled object will carry.
    pub etag: String,
    /// Metadata captured at creation; may declare the expected digest.
    pub metadata: HashMap<String, String>,
    /// Parts uploaded so far, keyed by part number.
    pub parts: BTreeMap<u32, Bytes>,
}

impl MultipartUpload {
    /// Create a new multipart upload.
    #[must_use]
    pub fn new(upload_id: String, key: String, metadata: HashMap<String, String>) -> Self {
        Self {
            etag: multipart_etag(&upload_id),
            upload_id,
            key,
            metadata,
            parts: BTreeMap::new(),
        }
    }

    /// Insert or replace a part.
    pub fn put_part(&mut self, part_number: u32, data: Bytes) {
        self.parts.insert(part_number, data);
    }

    /// Get a part by its number.
    #[must_use]
    pub fn get_part(&self, part_number: u32) -> Option<&Bytes> {
        self.parts.get(&part_number)
    }

    /// Return the number of distinct parts uploaded so far.
    #[must_use]
    pub fn parts_count(&self) -> usize {
        self.parts.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
