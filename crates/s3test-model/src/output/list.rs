use crate::types::Object;

/// S3 ListObjectsV2Output.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsV2Output {
    /// The objects whose keys start with the prefix.
    pub contents: Vec<Object>,
    /// Always false: results are never paginated.
    pub is_truncated: bool,
    /// Number of entries in `contents`.
    pub key_count: usize,
    /// The bucket name.
    pub name: String,
    /// The prefix the listing was filtered by.
    pub prefix: Option<String>,
}
