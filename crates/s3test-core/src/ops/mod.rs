//! S3 operation handlers.
//!
//! Each submodule adds operation methods to [`crate::provider::InMemoryS3`].
//! Every operation first calls `begin` to count the call, honor an injected
//! fault, and check the bucket before it touches the store.

pub mod bucket;
pub mod list;
pub mod multipart;
pub mod object;

use crate::error::{S3TestError, S3TestResult};

/// Split an `x-amz-copy-source` value into bucket and key.
///
/// The value has the form `bucket/key` with an optional leading `/`, and may
/// be percent-encoded as a whole.
pub(crate) fn parse_copy_source(source: &str) -> S3TestResult<(String, String)> {
    let invalid = || S3TestError::InvalidCopySource {
        copy_source: source.to_owned(),
    };

    let decoded = percent_encoding::percent_decode_str(source)
        .decode_utf8()
        .map_err(|_| invalid())?;
    let path = decoded.strip_prefix('/').unwrap_or(&decoded);
    let (bucket, key) = path.split_once('/').ok_or_else(invalid)?;
    if bucket.is_empty() || key.is_empty() {
        return Err(invalid());
    }
    Ok((bucket.to_owned(), key.to_owned()))
}
