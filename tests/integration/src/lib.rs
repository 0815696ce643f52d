//! End-to-end tests for the s3test in-memory object store.
//!
//! Every scenario drives a shared [`InMemoryS3`] through the async
//! [`S3Api`](s3test_core::S3Api) layer, the way client code under test
//! would. Run them with:
//! ```text
//! cargo test -p s3test-integration
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Once};

use s3test_core::{InMemoryS3, S3TestConfig};
use s3test_model::StreamingBlob;
use s3test_model::input::{GetObjectInput, PutObjectInput};
use s3test_model::output::GetObjectOutput;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Bucket served by every test store.
pub const TEST_BUCKET: &str = "integration";

/// Initialize tracing (once).
///
/// `RUST_LOG` wins; otherwise the configured `LOG_LEVEL` applies.
fn init_tracing() {
    INIT.call_once(|| {
        let level = S3TestConfig::from_env().log_level;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
            )
            .with_test_writer()
            .init();
    });
}

/// Create a fresh store serving [`TEST_BUCKET`].
#[must_use]
pub fn test_store() -> Arc<InMemoryS3> {
    init_tracing();
    let config = S3TestConfig::builder()
        .bucket(TEST_BUCKET.to_owned())
        .build();
    Arc::new(InMemoryS3::new(config))
}

/// A put request for `key` carrying `body` and optional extra metadata.
#[must_use]
pub fn put_input(key: &str, body: impl Into<bytes::Bytes>) -> PutObjectInput {
    PutObjectInput {
        bucket: TEST_BUCKET.to_owned(),
        key: key.to_owned(),
        body: Some(StreamingBlob::new(body)),
        metadata: HashMap::new(),
    }
}

/// A get request for `key` with an optional range header.
#[must_use]
pub fn get_input(key: &str, range: Option<&str>) -> GetObjectInput {
    GetObjectInput {
        bucket: TEST_BUCKET.to_owned(),
        key: key.to_owned(),
        range: range.map(str::to_owned),
    }
}

/// The body bytes of a get response, read in full.
///
/// # Panics
///
/// Panics if the body cannot be read.
#[must_use]
pub fn body_bytes(output: &GetObjectOutput) -> bytes::Bytes {
    output
        .body
        .clone()
        .unwrap_or_default()
        .read_all()
        .unwrap_or_else(|e| panic!("body read failed: {e}"))
}

mod test_concurrency;
mod test_object;
mod test_range;
