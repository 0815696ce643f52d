/// S3 ListObjectsV2Input.
///
/// Only prefix filtering is honored; every matching key comes back in a
/// single page.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsV2Input {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP query: `prefix`.
    pub prefix: Option<String>,
}
