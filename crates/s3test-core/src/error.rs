//! Error types for the in-memory object store.
//!
//! [`S3TestError`] covers every failure an operation can report. Each
//! variant maps to a well-known [`S3ErrorCode`] through
//! [`S3TestError::code`], so client code that branches on S3 error codes
//! behaves the same against the store as against the real service.
//!
//! # Usage
//!
//! ```
//! use s3test_core::error::S3TestError;
//! use s3test_model::S3ErrorCode;
//!
//! let err = S3TestError::NoSuchKey {
//!     key: "missing.txt".to_owned(),
//! };
//! assert_eq!(err.code(), S3ErrorCode::NoSuchKey);
//! assert!(err.to_string().contains("missing.txt"));
//! ```

use s3test_model::{S3ErrorCode, S3Operation};

/// A fault returned by every operation while it is installed.
///
/// Tests use it to simulate a failing service (throttling, outages) and to
/// verify the caller's error handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct InjectedFault {
    /// The S3 error code the fault reports.
    pub code: S3ErrorCode,
    /// A human-readable message.
    pub message: String,
}

impl InjectedFault {
    /// Create a fault with the given code and message.
    #[must_use]
    pub fn new(code: S3ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Errors produced by the in-memory object store.
#[derive(Debug, thiserror::Error)]
pub enum S3TestError {
    // -----------------------------------------------------------------------
    // Lookup errors
    // -----------------------------------------------------------------------
    /// The specified key does not exist.
    #[error("The specified key does not exist: {key}")]
    NoSuchKey {
        /// The key that was not found.
        key: String,
    },

    /// The specified multipart upload does not exist.
    #[error("The specified upload does not exist: {upload_id}")]
    NoSuchUpload {
        /// The upload ID that was not found.
        upload_id: String,
    },

    /// The request named a bucket other than the one the store serves.
    #[error("Unexpected bucket: got {actual}, expect {expected}")]
    BucketMismatch {
        /// The bucket the store serves.
        expected: String,
        /// The bucket named by the request.
        actual: String,
    },

    // -----------------------------------------------------------------------
    // Integrity errors
    // -----------------------------------------------------------------------
    /// The declared SHA-256 digest does not match the content.
    #[error("sha256 checksum mismatch: got {expected}, expect {actual}")]
    ChecksumMismatch {
        /// The digest declared in the request metadata.
        expected: String,
        /// The digest of the bytes actually stored.
        actual: String,
    },

    // -----------------------------------------------------------------------
    // Multipart structure errors
    // -----------------------------------------------------------------------
    /// The completion request names a different key than the upload.
    #[error("Key mismatch: upload is for {expected}, completion names {actual}")]
    KeyMismatch {
        /// The key the upload was created for.
        expected: String,
        /// The key named by the completion request.
        actual: String,
    },

    /// The completion lists a different number of parts than were uploaded.
    #[error("Parts mismatch: {actual} parts listed, {expected} parts uploaded")]
    PartCountMismatch {
        /// Number of parts buffered by the upload.
        expected: usize,
        /// Number of parts listed in the completion request.
        actual: usize,
    },

    /// The list of parts was not in strictly ascending order.
    #[error("The list of parts was not in ascending order: part {part_number} follows {previous}")]
    InvalidPartOrder {
        /// The out-of-order part number.
        part_number: i64,
        /// The part number listed before it.
        previous: i64,
    },

    /// A listed part was never uploaded.
    #[error("One or more of the specified parts could not be found: part {part_number}")]
    InvalidPart {
        /// The missing part number.
        part_number: i64,
    },

    // -----------------------------------------------------------------------
    // Validation errors
    // -----------------------------------------------------------------------
    /// An argument provided is invalid.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// The copy source header could not be decoded.
    #[error("Invalid copy source: {copy_source}")]
    InvalidCopySource {
        /// The raw copy source value.
        copy_source: String,
    },

    // -----------------------------------------------------------------------
    // Injected / transport errors
    // -----------------------------------------------------------------------
    /// A fault installed through [`crate::InMemoryS3::set_fault`].
    #[error(transparent)]
    Injected(#[from] InjectedFault),

    /// The request did not finish within its timeout.
    #[error("Request timed out: {operation}")]
    RequestTimeout {
        /// The operation that timed out.
        operation: S3Operation,
    },

    // -----------------------------------------------------------------------
    // Internal / catch-all
    // -----------------------------------------------------------------------
    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl S3TestError {
    /// Returns the S3 error code for this error.
    #[must_use]
    pub fn code(&self) -> S3ErrorCode {
        match self {
            Self::NoSuchKey { .. } => S3ErrorCode::NoSuchKey,
            Self::NoSuchUpload { .. } => S3ErrorCode::NoSuchUpload,
            Self::BucketMismatch { .. } => S3ErrorCode::NoSuchBucket,
            Self::ChecksumMismatch { .. } => S3ErrorCode::BadDigest,
            Self::KeyMismatch { .. } => S3ErrorCode::InvalidRequest,
            Self::PartCountMismatch { .. } | Self::InvalidPart { .. } => S3ErrorCode::InvalidPart,
            Self::InvalidPartOrder { .. } => S3ErrorCode::InvalidPartOrder,
            Self::InvalidArgument { .. } | Self::InvalidCopySource { .. } => {
                S3ErrorCode::InvalidArgument
            }
            Self::Injected(fault) => fault.code,
            Self::RequestTimeout { .. } => S3ErrorCode::RequestTimeout,
            Self::Internal(_) => S3ErrorCode::InternalError,
        }
    }

    /// Returns true if a caller may retry the failed request.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.code().is_retryable()
    }
}

/// Convenience result type for store operations.
pub type S3TestResult<T> = Result<T, S3TestError>;
