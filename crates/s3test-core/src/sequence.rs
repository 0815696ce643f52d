//! Entity-tag and upload-ID generation.
//!
//! The store never reaches for global state to mint identifiers; it is
//! handed an [`IdGenerator`] at construction. [`SequentialIds`] produces the
//! predictable `testetag<N>` / `testuploadid<N>` values tests assert on, and
//! [`RandomIds`] produces UUID-based values for tests that must not depend
//! on ordering.

use std::fmt;

use parking_lot::Mutex;
use uuid::Uuid;

/// Source of unique entity tags and multipart upload IDs.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    /// A fresh entity tag for a single-shot write.
    fn next_etag(&self) -> String;

    /// A fresh multipart upload ID.
    fn next_upload_id(&self) -> String;
}

/// The entity tag a multipart upload's assembled object will carry.
#[must_use]
pub fn multipart_etag(upload_id: &str) -> String {
    format!("testetag:{upload_id}")
}

/// Counter-based identifiers sharing one sequence.
///
/// ```
/// use s3test_core::sequence::{IdGenerator, SequentialIds};
///
/// let ids = SequentialIds::default();
/// assert_eq!(ids.next_etag(), "testetag0");
/// assert_eq!(ids.next_upload_id(), "testuploadid1");
/// assert_eq!(ids.next_etag(), "testetag2");
/// ```
#[derive(Debug, Default)]
pub struct SequentialIds {
    seq: Mutex<u64>,
}

impl SequentialIds {
    /// Start the sequence at `start`.
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        Self {
            seq: Mutex::new(start),
        }
    }

    fn next(&self) -> u64 {
        let mut seq = self.seq.lock();
        let n = *seq;
        *seq += 1;
        n
    }
}

impl IdGenerator for SequentialIds {
    fn next_etag(&self) -> String {
        format!("testetag{}", self.next())
    }

    fn next_upload_id(&self) -> String {
        format!("testuploadid{}", self.next())
    }
}

/// UUID-based identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_etag(&self) -> String {
        format!("\"{}\"", Uuid::new_v4().simple())
    }

    fn next_upload_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
