//! Request body types.

use bytes::Bytes;

/// A wrapper around [`Bytes`] for request and response payloads.
///
/// Bodies are fully buffered before they reach the store, so the wrapper
/// never streams; it only gives bodies a distinct type in the DTOs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamingBlob {
    /// The underlying bytes data.
    pub data: Bytes,
}

impl StreamingBlob {
    /// Create a new `StreamingBlob` from bytes.
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Returns true if the blob is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the length of the blob.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Consume the blob and return the underlying bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

impl From<Bytes> for StreamingBlob {
    fn from(data: Bytes) -> Self {
        Self { data }
    }
}

impl From<Vec<u8>> for StreamingBlob {
    fn from(data: Vec<u8>) -> Self {
        Self { data: data.into() }
    }
}

impl From<&'static str> for StreamingBlob {
    fn from(data: &'static str) -> Self {
        Self {
            data: Bytes::from_static(data.as_bytes()),
        }
    }
}

impl From<&[u8]> for StreamingBlob {
    fn from(data: &[u8]) -> Self {
        Self {
            data: Bytes::copy_from_slice(data),
        }
    }
}

impl AsRef<[u8]> for StreamingBlob {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
