//! Shared structures referenced by inputs and outputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An object entry returned by `ListObjectsV2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Object {
    /// The object key.
    pub key: String,
    /// The object size in bytes.
    pub size: u64,
    /// When the object was last written.
    pub last_modified: DateTime<Utc>,
    /// The entity tag of the object.
    pub e_tag: String,
}

/// The part list sent with `CompleteMultipartUpload`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedMultipartUpload {
    /// The parts in the order the caller wants them assembled.
    pub parts: Vec<CompletedPart>,
}

impl CompletedMultipartUpload {
    /// Build a part list from bare part numbers.
    #[must_use]
    pub fn from_part_numbers(numbers: impl IntoIterator<Item = i32>) -> Self {
        Self {
            parts: numbers.into_iter().map(CompletedPart::new).collect(),
        }
    }
}

/// One entry of a completed part list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedPart {
    /// The part number.
    pub part_number: Option<i32>,
    /// The entity tag returned by `UploadPart`.
    pub e_tag: Option<String>,
}

impl CompletedPart {
    /// Create a part entry without an entity tag.
    #[must_use]
    pub fn new(part_number: i32) -> Self {
        Self {
            part_number: Some(part_number),
            e_tag: None,
        }
    }
}

/// Result block of `CopyObject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyObjectResult {
    /// The entity tag of the destination object.
    pub e_tag: Option<String>,
    /// When the destination object was last written.
    pub last_modified: Option<DateTime<Utc>>,
}

/// Result block of `UploadPartCopy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyPartResult {
    /// The entity tag recorded for the part.
    pub e_tag: Option<String>,
    /// When the part was copied.
    pub last_modified: Option<DateTime<Utc>>,
}
