//! Asynchronous calling convention over [`InMemoryS3`].
//!
//! Client code written against an async object-storage client can target
//! the [`S3Api`] trait and be handed an `InMemoryS3` in tests. The trait is
//! pure translation: each method delegates to the one synchronous
//! implementation of that operation.
//!
//! [`S3Request`] adds per-request options on top. A request is built from
//! an operation input, optionally given a timeout and free-form labels, and
//! executed with [`S3Request::send`].
//!
//! ```
//! use std::time::Duration;
//!
//! use s3test_core::InMemoryS3;
//! use s3test_model::input::{GetObjectInput, PutObjectInput};
//!
//! # tokio_test::block_on(async {
//! let s3 = InMemoryS3::default();
//! s3.request(PutObjectInput {
//!     bucket: "s3test".into(),
//!     key: "a.txt".into(),
//!     body: Some("alpha".into()),
//!     ..Default::default()
//! })
//! .timeout(Duration::from_secs(1))
//! .label("caller", "doc-example")
//! .send()
//! .await
//! .unwrap();
//!
//! let out = s3
//!     .request(GetObjectInput {
//!         bucket: "s3test".into(),
//!         key: "a.txt".into(),
//!         range: None,
//!     })
//!     .send()
//!     .await
//!     .unwrap();
//! assert_eq!(out.content_length, 5);
//! # });
//! ```

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::future::BoxFuture;
use s3test_model::S3Operation;
use s3test_model::input::{
    AbortMultipartUploadInput, CompleteMultipartUploadInput, CopyObjectInput,
    CreateMultipartUploadInput, DeleteObjectInput, GetBucketLocationInput, GetObjectInput,
    HeadObjectInput, ListObjectsV2Input, PutObjectInput, UploadPartCopyInput, UploadPartInput,
};
use s3test_model::output::{
    AbortMultipartUploadOutput, CompleteMultipartUploadOutput, CopyObjectOutput,
    CreateMultipartUploadOutput, DeleteObjectOutput, GetBucketLocationOutput, GetObjectOutput,
    HeadObjectOutput, ListObjectsV2Output, PutObjectOutput, UploadPartCopyOutput,
    UploadPartOutput,
};
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::error::{S3TestError, S3TestResult};
use crate::provider::InMemoryS3;

// ---------------------------------------------------------------------------
// S3Api
// ---------------------------------------------------------------------------

/// The object-storage operations, as an object-safe async trait.
#[async_trait]
pub trait S3Api: Send + Sync {
    /// Describe an object.
    async fn head_object(&self, input: HeadObjectInput) -> S3TestResult<HeadObjectOutput>;

    /// List objects by prefix.
    async fn list_objects_v2(&self, input: ListObjectsV2Input)
    -> S3TestResult<ListObjectsV2Output>;

    /// Store an object.
    async fn put_object(&self, input: PutObjectInput) -> S3TestResult<PutObjectOutput>;

    /// Read an object or a byte range of it.
    async fn get_object(&self, input: GetObjectInput) -> S3TestResult<GetObjectOutput>;

    /// Start a multipart upload.
    async fn create_multipart_upload(
        &self,
        input: CreateMultipartUploadInput,
    ) -> S3TestResult<CreateMultipartUploadOutput>;

    /// Upload one part.
    async fn upload_part(&self, input: UploadPartInput) -> S3TestResult<UploadPartOutput>;

    /// Upload one part copied from an existing object.
    async fn upload_part_copy(
        &self,
        input: UploadPartCopyInput,
    ) -> S3TestResult<UploadPartCopyOutput>;

    /// Assemble uploaded parts into an object.
    async fn complete_multipart_upload(
        &self,
        input: CompleteMultipartUploadInput,
    ) -> S3TestResult<CompleteMultipartUploadOutput>;

    /// Discard a multipart upload.
    async fn abort_multipart_upload(
        &self,
        input: AbortMultipartUploadInput,
    ) -> S3TestResult<AbortMultipartUploadOutput>;

    /// Copy an object within the bucket.
    async fn copy_object(&self, input: CopyObjectInput) -> S3TestResult<CopyObjectOutput>;

    /// Delete an object.
    async fn delete_object(&self, input: DeleteObjectInput) -> S3TestResult<DeleteObjectOutput>;

    /// Report the bucket's region.
    async fn get_bucket_location(
        &self,
        input: GetBucketLocationInput,
    ) -> S3TestResult<GetBucketLocationOutput>;
}

#[async_trait]
impl S3Api for InMemoryS3 {
    async fn head_object(&self, input: HeadObjectInput) -> S3TestResult<HeadObjectOutput> {
        InMemoryS3::head_object(self, input)
    }

    async fn list_objects_v2(
        &self,
        input: ListObjectsV2Input,
    ) -> S3TestResult<ListObjectsV2Output> {
        InMemoryS3::list_objects_v2(self, input)
    }

    async fn put_object(&self, input: PutObjectInput) -> S3TestResult<PutObjectOutput> {
        InMemoryS3::put_object(self, input)
    }

    async fn get_object(&self, input: GetObjectInput) -> S3TestResult<GetObjectOutput> {
        InMemoryS3::get_object(self, input)
    }

    async fn create_multipart_upload(
        &self,
        input: CreateMultipartUploadInput,
    ) -> S3TestResult<CreateMultipartUploadOutput> {
        InMemoryS3::create_multipart_upload(self, input)
    }

    async fn upload_part(&self, input: UploadPartInput) -> S3TestResult<UploadPartOutput> {
        InMemoryS3::upload_part(self, input)
    }

    async fn upload_part_copy(
        &self,
        input: UploadPartCopyInput,
    ) -> S3TestResult<UploadPartCopyOutput> {
        InMemoryS3::upload_part_copy(self, input)
    }

    async fn complete_multipart_upload(
        &self,
        input: CompleteMultipartUploadInput,
    ) -> S3TestResult<CompleteMultipartUploadOutput> {
        InMemoryS3::complete_multipart_upload(self, input)
    }

    async fn abort_multipart_upload(
        &self,
        input: AbortMultipartUploadInput,
    ) -> S3TestResult<AbortMultipartUploadOutput> {
        InMemoryS3::abort_multipart_upload(self, input)
    }

    async fn copy_object(&self, input: CopyObjectInput) -> S3TestResult<CopyObjectOutput> {
        InMemoryS3::copy_object(self, input)
    }

    async fn delete_object(&self, input: DeleteObjectInput) -> S3TestResult<DeleteObjectOutput> {
        InMemoryS3::delete_object(self, input)
    }

    async fn get_bucket_location(
        &self,
        input: GetBucketLocationInput,
    ) -> S3TestResult<GetBucketLocationOutput> {
        InMemoryS3::get_bucket_location(self, input)
    }
}

// ---------------------------------------------------------------------------
// S3Input
// ---------------------------------------------------------------------------

/// An operation input that knows which [`S3Api`] method serves it.
pub trait S3Input: Send + Sized + 'static {
    /// The output the operation produces.
    type Output: Send;

    /// The operation this input belongs to.
    const OPERATION: S3Operation;

    /// Invoke the matching method on `api`.
    fn dispatch(self, api: &dyn S3Api) -> BoxFuture<'_, S3TestResult<Self::Output>>;
}

macro_rules! impl_s3_input {
    ($($input:ident => $output:ident, $op:ident, $method:ident;)*) => {
        $(
            impl S3Input for $input {
                type Output = $output;

                const OPERATION: S3Operation = S3Operation::$op;

                fn dispatch(self, api: &dyn S3Api) -> BoxFuture<'_, S3TestResult<$output>> {
                    api.$method(self)
                }
            }
        )*
    };
}

impl_s3_input! {
    HeadObjectInput => HeadObjectOutput, HeadObject, head_object;
    ListObjectsV2Input => ListObjectsV2Output, ListObjectsV2, list_objects_v2;
    PutObjectInput => PutObjectOutput, PutObject, put_object;
    GetObjectInput => GetObjectOutput, GetObject, get_object;
    CreateMultipartUploadInput => CreateMultipartUploadOutput, CreateMultipartUpload,
        create_multipart_upload;
    UploadPartInput => UploadPartOutput, UploadPart, upload_part;
    UploadPartCopyInput => UploadPartCopyOutput, UploadPartCopy, upload_part_copy;
    CompleteMultipartUploadInput => CompleteMultipartUploadOutput, CompleteMultipartUpload,
        complete_multipart_upload;
    AbortMultipartUploadInput => AbortMultipartUploadOutput, AbortMultipartUpload,
        abort_multipart_upload;
    CopyObjectInput => CopyObjectOutput, CopyObject, copy_object;
    DeleteObjectInput => DeleteObjectOutput, DeleteObject, delete_object;
    GetBucketLocationInput => GetBucketLocationOutput, GetBucketLocation, get_bucket_location;
}

// ---------------------------------------------------------------------------
// S3Request
// ---------------------------------------------------------------------------

/// Per-request options.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct RequestOptions {
    /// Fail with [`S3TestError::RequestTimeout`] if the request has not
    /// finished within this duration.
    #[builder(default, setter(strip_option))]
    pub timeout: Option<Duration>,

    /// Free-form labels attached to the request's log line.
    #[builder(default)]
    pub labels: HashMap<String, String>,
}

/// A pending call of one operation against an [`S3Api`].
pub struct S3Request<'a, T> {
    api: &'a dyn S3Api,
    /// The operation input.
    pub input: T,
    /// Options applied when the request is sent.
    pub options: RequestOptions,
}

impl<T: fmt::Debug> fmt::Debug for S3Request<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Request")
            .field("input", &self.input)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'a, T: S3Input> S3Request<'a, T> {
    /// Create a request for `input` against `api`.
    #[must_use]
    pub fn new(api: &'a dyn S3Api, input: T) -> Self {
        Self {
            api,
            input,
            options: RequestOptions::default(),
        }
    }

    /// Replace all options.
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Bound the request by `timeout`.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Attach a label.
    #[must_use]
    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.labels.insert(key.into(), value.into());
        self
    }

    /// Execute the request.
    ///
    /// # Errors
    ///
    /// Returns whatever the operation returns, or
    /// [`S3TestError::RequestTimeout`] if a timeout is set and elapses
    /// first.
    pub async fn send(self) -> S3TestResult<T::Output> {
        let operation = T::OPERATION;
        let started = Instant::now();
        let fut = self.input.dispatch(self.api);

        let result = match self.options.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .unwrap_or(Err(S3TestError::RequestTimeout { operation })),
            None => fut.await,
        };

        debug!(
            %operation,
            labels = ?self.options.labels,
            elapsed_us = started.elapsed().as_micros(),
            ok = result.is_ok(),
            "sent request"
        );
        result
    }
}

impl InMemoryS3 {
    /// Build a request for `input` against this client.
    #[must_use]
    pub fn request<T: S3Input>(&self, input: T) -> S3Request<'_, T> {
        S3Request::new(self, input)
    }
}
