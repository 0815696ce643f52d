use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::content::ObjectBody;
use crate::types::CopyObjectResult;

/// S3 CopyObjectOutput.
#[derive(Debug, Clone, Default)]
pub struct CopyObjectOutput {
    /// HTTP payload body.
    pub copy_object_result: Option<CopyObjectResult>,
}

/// S3 DeleteObjectOutput.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectOutput {}

/// S3 GetObjectOutput.
///
/// A read of a key that was never stored yields an empty body and a zero
/// content length with every optional field unset.
#[derive(Debug, Clone, Default)]
pub struct GetObjectOutput {
    /// HTTP payload body, read lazily from the stored content.
    pub body: Option<ObjectBody>,
    /// HTTP header: `Content-Length`.
    pub content_length: u64,
    /// HTTP header: `Content-Range`.
    pub content_range: Option<String>,
    /// HTTP header: `ETag`.
    pub e_tag: Option<String>,
    /// HTTP header: `Last-Modified`.
    pub last_modified: Option<DateTime<Utc>>,
}

/// S3 HeadObjectOutput.
#[derive(Debug, Clone, Default)]
pub struct HeadObjectOutput {
    /// HTTP header: `Content-Length`.
    pub content_length: u64,
    /// HTTP header: `ETag`.
    pub e_tag: Option<String>,
    /// HTTP header: `Last-Modified`.
    pub last_modified: Option<DateTime<Utc>>,
    /// HTTP prefix headers: `x-amz-meta-`.
    pub metadata: HashMap<String, String>,
}

/// S3 PutObjectOutput.
#[derive(Debug, Clone, Default)]
pub struct PutObjectOutput {
    /// HTTP header: `ETag`.
    pub e_tag: Option<String>,
}
