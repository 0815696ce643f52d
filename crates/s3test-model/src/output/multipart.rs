use crate::types::CopyPartResult;

/// S3 AbortMultipartUploadOutput.
#[derive(Debug, Clone, Default)]
pub struct AbortMultipartUploadOutput {}

/// S3 CompleteMultipartUploadOutput.
#[derive(Debug, Clone, Default)]
pub struct CompleteMultipartUploadOutput {
    /// The bucket name.
    pub bucket: Option<String>,
    /// Entity tag of the assembled object.
    pub e_tag: Option<String>,
    /// The object key.
    pub key: Option<String>,
}

/// S3 CreateMultipartUploadOutput.
#[derive(Debug, Clone, Default)]
pub struct CreateMultipartUploadOutput {
    /// The bucket name.
    pub bucket: Option<String>,
    /// The object key.
    pub key: Option<String>,
    /// The ID subsequent part uploads must name.
    pub upload_id: Option<String>,
}

/// S3 UploadPartCopyOutput.
#[derive(Debug, Clone, Default)]
pub struct UploadPartCopyOutput {
    /// HTTP payload body.
    pub copy_part_result: Option<CopyPartResult>,
}

/// S3 UploadPartOutput.
#[derive(Debug, Clone, Default)]
pub struct UploadPartOutput {
    /// HTTP header: `ETag`.
    pub e_tag: Option<String>,
}
