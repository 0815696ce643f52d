/// S3 GetBucketLocationInput.
#[derive(Debug, Clone, Default)]
pub struct GetBucketLocationInput {
    /// HTTP label (URI path).
    pub bucket: String,
}
