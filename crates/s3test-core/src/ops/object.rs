//! Object operation handlers.
//!
//! Implements `put_object`, `get_object`, `head_object`, `delete_object`,
//! and `copy_object`.

use std::collections::HashMap;

use s3test_model::content::ObjectBody;
use s3test_model::input::{
    CopyObjectInput, DeleteObjectInput, GetObjectInput, HeadObjectInput, PutObjectInput,
};
use s3test_model::output::{
    CopyObjectOutput, DeleteObjectOutput, GetObjectOutput, HeadObjectOutput, PutObjectOutput,
};
use s3test_model::request::StreamingBlob;
use s3test_model::types::CopyObjectResult;
use s3test_model::{CONTENT_SHA256_KEY, S3Operation};
use tracing::debug;

use super::parse_copy_source;
use crate::error::{S3TestError, S3TestResult};
use crate::provider::InMemoryS3;
use crate::range::resolve_range;

impl InMemoryS3 {
    /// Store an object whose body is already in memory.
    pub fn put_object(&self, input: PutObjectInput) -> S3TestResult<PutObjectOutput> {
        self.begin(S3Operation::PutObject, &input.bucket)?;

        let body = input.body.map(StreamingBlob::into_bytes).unwrap_or_default();
        let object = self.store.put(&input.key, body, &input.metadata)?;

        debug!(key = %input.key, size = object.size(), etag = %object.etag, "put_object completed");
        Ok(PutObjectOutput {
            e_tag: Some(object.etag),
        })
    }

    /// Read an object, or the window selected by `range`.
    ///
    /// The body is a lazy window over the stored content; bytes are copied
    /// only as the caller reads them. A key that was never stored yields an
    /// empty body rather than an error. A range that cannot be applied is
    /// ignored and the whole object is returned. `content_range` is set
    /// only when the window is a proper part of the object.
    pub fn get_object(&self, input: GetObjectInput) -> S3TestResult<GetObjectOutput> {
        self.begin(S3Operation::GetObject, &input.bucket)?;

        let Some(object) = self.store.get(&input.key) else {
            debug!(key = %input.key, "get_object found no content");
            return Ok(GetObjectOutput {
                body: Some(ObjectBody::default()),
                ..GetObjectOutput::default()
            });
        };

        let size = object.size();
        let range = resolve_range(input.range.as_deref(), size);
        let body = object.body(range);
        let partial = range.filter(|r| r.start > 0 || r.last + 1 < size);

        debug!(
            key = %input.key,
            size,
            returned = body.remaining(),
            range = ?range,
            "get_object completed"
        );
        Ok(GetObjectOutput {
            content_length: body.remaining(),
            body: Some(body),
            content_range: partial.map(|r| r.content_range(size)),
            e_tag: Some(object.etag),
            last_modified: Some(object.last_modified),
        })
    }

    /// Describe an object without returning its body.
    pub fn head_object(&self, input: HeadObjectInput) -> S3TestResult<HeadObjectOutput> {
        self.begin(S3Operation::HeadObject, &input.bucket)?;

        let object = self
            .store
            .get(&input.key)
            .ok_or_else(|| S3TestError::NoSuchKey {
                key: input.key.clone(),
            })?;

        debug!(key = %input.key, size = object.size(), "head_object completed");
        Ok(HeadObjectOutput {
            content_length: object.size(),
            e_tag: Some(object.etag),
            last_modified: Some(object.last_modified),
            metadata: HashMap::from([(CONTENT_SHA256_KEY.to_owned(), object.sha256)]),
        })
    }

    /// Remove an object. Deleting a missing key succeeds.
    pub fn delete_object(&self, input: DeleteObjectInput) -> S3TestResult<DeleteObjectOutput> {
        self.begin(S3Operation::DeleteObject, &input.bucket)?;

        let existed = self.store.delete(&input.key);
        debug!(key = %input.key, existed, "delete_object completed");
        Ok(DeleteObjectOutput {})
    }

    /// Copy an object within the bucket.
    ///
    /// The destination shares the source's content, digest, and entity tag.
    pub fn copy_object(&self, input: CopyObjectInput) -> S3TestResult<CopyObjectOutput> {
        self.begin(S3Operation::CopyObject, &input.bucket)?;

        let src_key = self.same_bucket_source(&input.copy_source)?;
        let object = self.store.copy(&src_key, &input.key, &input.metadata)?;

        debug!(src = %src_key, dst = %input.key, etag = %object.etag, "copy_object completed");
        Ok(CopyObjectOutput {
            copy_object_result: Some(CopyObjectResult {
                e_tag: Some(object.etag),
                last_modified: Some(object.last_modified),
            }),
        })
    }

    /// Resolve a copy source to a key in the served bucket.
    pub(crate) fn same_bucket_source(&self, copy_source: &str) -> S3TestResult<String> {
        let (bucket, key) = parse_copy_source(copy_source)?;
        if bucket != self.config.bucket {
            return Err(S3TestError::BucketMismatch {
                expected: self.config.bucket.clone(),
                actual: bucket,
            });
        }
        Ok(key)
    }
}
