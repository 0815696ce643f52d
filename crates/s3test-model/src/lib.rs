//! Operation, input, output, and error-code types for the s3test object store.
//!
//! The shapes follow the S3 API surface that upload and download managers
//! actually touch: object CRUD, prefix listing, multipart uploads, and bucket
//! location. Field names match the S3 members they stand in for, so client
//! code translates one-to-one.

pub mod content;
pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod request;
pub mod types;

pub use content::{ContentAt, ObjectBody};
pub use error::S3ErrorCode;
pub use operations::S3Operation;
pub use request::StreamingBlob;

/// Metadata key carrying the lowercase hex SHA-256 digest of an object's content.
pub const CONTENT_SHA256_KEY: &str = "Content-Sha256";
