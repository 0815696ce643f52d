//! List operation handlers.

use s3test_model::S3Operation;
use s3test_model::input::ListObjectsV2Input;
use s3test_model::output::ListObjectsV2Output;
use tracing::debug;

use crate::error::S3TestResult;
use crate::provider::InMemoryS3;

impl InMemoryS3 {
    /// List every object whose key starts with the prefix, in one page.
    pub fn list_objects_v2(&self, input: ListObjectsV2Input) -> S3TestResult<ListObjectsV2Output> {
        self.begin(S3Operation::ListObjectsV2, &input.bucket)?;

        let prefix = input.prefix.as_deref().unwrap_or_default();
        let contents: Vec<_> = self
            .store
            .list_prefix(prefix)
            .iter()
            .map(|o| o.to_listing())
            .collect();

        debug!(bucket = %input.bucket, prefix, count = contents.len(), "list_objects_v2 completed");
        Ok(ListObjectsV2Output {
            key_count: contents.len(),
            contents,
            is_truncated: false,
            name: input.bucket,
            prefix: input.prefix,
        })
    }
}
