//! SHA-256 content digests and their verification against metadata.
//!
//! Every stored object carries the lowercase hex SHA-256 of its content.
//! Writers may declare the digest they expect under the
//! [`CONTENT_SHA256_KEY`] metadata key; a write whose bytes hash to
//! something else is rejected with [`S3TestError::ChecksumMismatch`].

use std::collections::HashMap;

use digest::Digest;
use s3test_model::CONTENT_SHA256_KEY;
use sha2::Sha256;

use crate::content::ContentAt;
use crate::error::{S3TestError, S3TestResult};

/// Chunk size used when hashing content through [`ContentAt::read_at`].
const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// Compute the lowercase hex SHA-256 digest of `data`.
///
/// # Examples
///
/// ```
/// use s3test_core::checksums::compute_sha256;
///
/// assert_eq!(
///     compute_sha256(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[must_use]
pub fn compute_sha256(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Look up the declared SHA-256 digest in `metadata`.
///
/// The exact key wins. Otherwise the key is matched ASCII
/// case-insensitively, taking the lexicographically smallest spelling when
/// several differ only in case.
#[must_use]
pub fn declared_sha256(metadata: &HashMap<String, String>) -> Option<&str> {
    if let Some(v) = metadata.get(CONTENT_SHA256_KEY) {
        return Some(v.as_str());
    }
    metadata
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case(CONTENT_SHA256_KEY))
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, v)| v.as_str())
}

/// Check a declared digest against the actual one.
///
/// # Errors
///
/// Returns [`S3TestError::ChecksumMismatch`] when a digest is declared and
/// differs from `actual`.
pub fn verify_declared(declared: Option<&str>, actual: &str) -> S3TestResult<()> {
    match declared {
        Some(expected) if expected != actual => Err(S3TestError::ChecksumMismatch {
            expected: expected.to_owned(),
            actual: actual.to_owned(),
        }),
        _ => Ok(()),
    }
}

/// Hash `data` and verify it against any digest declared in `metadata`.
///
/// Returns the computed digest on success.
///
/// # Errors
///
/// Returns [`S3TestError::ChecksumMismatch`] if the declared digest does not
/// match the content.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use s3test_core::checksums::{compute_sha256, verify_content};
///
/// let mut meta = HashMap::new();
/// meta.insert("Content-Sha256".to_owned(), compute_sha256(b"abc"));
/// assert!(verify_content(b"abc", &meta).is_ok());
/// assert!(verify_content(b"abd", &meta).is_err());
/// ```
pub fn verify_content(data: &[u8], metadata: &HashMap<String, String>) -> S3TestResult<String> {
    let actual = compute_sha256(data);
    verify_declared(declared_sha256(metadata), &actual)?;
    Ok(actual)
}

// ---------------------------------------------------------------------------
// ContentHasher
// ---------------------------------------------------------------------------

/// Incremental SHA-256 hasher.
///
/// # Examples
///
/// ```
/// use s3test_core::checksums::{compute_sha256, ContentHasher};
///
/// let mut hasher = ContentHasher::new();
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// assert_eq!(hasher.finish(), compute_sha256(b"hello world"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContentHasher {
    sha256: Sha256,
}

impl ContentHasher {
    /// Create an empty hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed more data into the hasher.
    pub fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.sha256, data);
    }

    /// Finalize and return the lowercase hex digest.
    #[must_use]
    pub fn finish(self) -> String {
        hex::encode(self.sha256.finalize())
    }

    /// Hash arbitrary content in fixed-size chunks, never holding more than
    /// one chunk in memory.
    #[must_use]
    pub fn hash_content(content: &dyn ContentAt) -> String {
        let mut hasher = Self::new();
        let mut buf = vec![0u8; HASH_CHUNK_SIZE];
        let mut offset = 0u64;
        let size = content.size();
        while offset < size {
            let n = content.read_at(&mut buf, offset);
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
            offset += n as u64;
        }
        hasher.finish()
    }
}
