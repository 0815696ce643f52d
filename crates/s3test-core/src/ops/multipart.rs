//! Multipart upload operation handlers.
//!
//! Implements `create_multipart_upload`, `upload_part`, `upload_part_copy`,
//! `complete_multipart_upload`, and `abort_multipart_upload` by delegating
//! to the assembler on [`crate::storage::ObjectStore`].

use chrono::Utc;
use s3test_model::S3Operation;
use s3test_model::input::{
    AbortMultipartUploadInput, CompleteMultipartUploadInput, CreateMultipartUploadInput,
    UploadPartCopyInput, UploadPartInput,
};
use s3test_model::output::{
    AbortMultipartUploadOutput, CompleteMultipartUploadOutput, CreateMultipartUploadOutput,
    UploadPartCopyOutput, UploadPartOutput,
};
use s3test_model::request::StreamingBlob;
use s3test_model::types::CopyPartResult;
use tracing::debug;

use crate::error::{S3TestError, S3TestResult};
use crate::provider::InMemoryS3;

/// Highest part number S3 accepts.
const MAX_PART_NUMBER: i32 = 10_000;

/// Validate a part number from a request.
fn part_number(n: i32) -> S3TestResult<u32> {
    if (1..=MAX_PART_NUMBER).contains(&n) {
        Ok(n.unsigned_abs())
    } else {
        Err(S3TestError::InvalidArgument {
            message: format!(
                "Part number must be an integer between 1 and {MAX_PART_NUMBER}, got {n}"
            ),
        })
    }
}

impl InMemoryS3 {
    /// Start a multipart upload.
    pub fn create_multipart_upload(
        &self,
        input: CreateMultipartUploadInput,
    ) -> S3TestResult<CreateMultipartUploadOutput> {
        self.begin(S3Operation::CreateMultipartUpload, &input.bucket)?;

        let upload = self.store.initiate(&input.key, input.metadata);
        Ok(CreateMultipartUploadOutput {
            bucket: Some(input.bucket),
            key: Some(input.key),
            upload_id: Some(upload.upload_id),
        })
    }

    /// Buffer one part of an upload.
    pub fn upload_part(&self, input: UploadPartInput) -> S3TestResult<UploadPartOutput> {
        self.begin(S3Operation::UploadPart, &input.bucket)?;

        let number = part_number(input.part_number)?;
        let body = input.body.map(StreamingBlob::into_bytes).unwrap_or_default();
        let size = body.len();
        let etag = self.store.upload_part(&input.upload_id, number, body)?;

        debug!(upload_id = %input.upload_id, part_number = number, size, "upload_part completed");
        Ok(UploadPartOutput { e_tag: Some(etag) })
    }

    /// Buffer a window of an existing object as one part of an upload.
    pub fn upload_part_copy(
        &self,
        input: UploadPartCopyInput,
    ) -> S3TestResult<UploadPartCopyOutput> {
        self.begin(S3Operation::UploadPartCopy, &input.bucket)?;

        let number = part_number(input.part_number)?;
        let src_key = self.same_bucket_source(&input.copy_source)?;
        let etag = self.store.upload_part_copy(
            &input.upload_id,
            number,
            &src_key,
            input.copy_source_range.as_deref(),
        )?;

        debug!(
            upload_id = %input.upload_id,
            part_number = number,
            src = %src_key,
            range = ?input.copy_source_range,
            "upload_part_copy completed"
        );
        Ok(UploadPartCopyOutput {
            copy_part_result: Some(CopyPartResult {
                e_tag: Some(etag),
                last_modified: Some(Utc::now()),
            }),
        })
    }

    /// Assemble the listed parts into the final object.
    pub fn complete_multipart_upload(
        &self,
        input: CompleteMultipartUploadInput,
    ) -> S3TestResult<CompleteMultipartUploadOutput> {
        self.begin(S3Operation::CompleteMultipartUpload, &input.bucket)?;

        let part_numbers = input
            .multipart_upload
            .unwrap_or_default()
            .parts
            .into_iter()
            .map(|p| {
                p.part_number
                    .map(i64::from)
                    .ok_or_else(|| S3TestError::InvalidArgument {
                        message: "Every completed part must carry a part number".to_owned(),
                    })
            })
            .collect::<S3TestResult<Vec<i64>>>()?;

        let object = self
            .store
            .complete(&input.upload_id, &input.key, &part_numbers)?;

        Ok(CompleteMultipartUploadOutput {
            bucket: Some(input.bucket),
            e_tag: Some(object.etag),
            key: Some(input.key),
        })
    }

    /// Discard an upload. Unknown upload IDs are not an error.
    pub fn abort_multipart_upload(
        &self,
        input: AbortMultipartUploadInput,
    ) -> S3TestResult<AbortMultipartUploadOutput> {
        self.begin(S3Operation::AbortMultipartUpload, &input.bucket)?;

        self.store.abort(&input.upload_id);
        Ok(AbortMultipartUploadOutput {})
    }
}
