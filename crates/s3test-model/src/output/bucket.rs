/// S3 GetBucketLocationOutput.
#[derive(Debug, Clone, Default)]
pub struct GetBucketLocationOutput {
    /// HTTP payload body: `LocationConstraint`.
    pub location_constraint: Option<String>,
}
