use std::collections::HashMap;

use crate::request::StreamingBlob;
use crate::types::CompletedMultipartUpload;

/// S3 AbortMultipartUploadInput.
#[derive(Debug, Clone, Default)]
pub struct AbortMultipartUploadInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
}

/// S3 CompleteMultipartUploadInput.
#[derive(Debug, Clone, Default)]
pub struct CompleteMultipartUploadInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP payload body.
    pub multipart_upload: Option<CompletedMultipartUpload>,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
}

/// S3 CreateMultipartUploadInput.
#[derive(Debug, Clone, Default)]
pub struct CreateMultipartUploadInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP prefix headers: `x-amz-meta-`.
    pub metadata: HashMap<String, String>,
}

/// S3 UploadPartCopyInput.
#[derive(Debug, Clone, Default)]
pub struct UploadPartCopyInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP header: `x-amz-copy-source`, as `<bucket>/<key>`.
    pub copy_source: String,
    /// HTTP header: `x-amz-copy-source-range`.
    pub copy_source_range: Option<String>,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `partNumber`.
    pub part_number: i32,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
}

/// S3 UploadPartInput.
#[derive(Debug, Clone, Default)]
pub struct UploadPartInput {
    /// HTTP payload body.
    pub body: Option<StreamingBlob>,
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `partNumber`.
    pub part_number: i32,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
}
