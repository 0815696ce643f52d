//! Bucket-level operation handlers.

use s3test_model::S3Operation;
use s3test_model::input::GetBucketLocationInput;
use s3test_model::output::GetBucketLocationOutput;
use tracing::debug;

use crate::error::S3TestResult;
use crate::provider::InMemoryS3;

impl InMemoryS3 {
    /// Report the region the bucket lives in.
    pub fn get_bucket_location(
        &self,
        input: GetBucketLocationInput,
    ) -> S3TestResult<GetBucketLocationOutput> {
        self.begin(S3Operation::GetBucketLocation, &input.bucket)?;

        debug!(
            bucket = %input.bucket,
            region = %self.config.region,
            "get_bucket_location completed"
        );
        Ok(GetBucketLocationOutput {
            location_constraint: Some(self.config.region.clone()),
        })
    }
}
