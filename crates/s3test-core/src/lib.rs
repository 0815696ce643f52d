//! In-memory S3 object store for exercising upload and download clients.
//!
//! [`InMemoryS3`] answers the subset of the S3 API that transfer managers
//! rely on (object CRUD, prefix listing, multipart uploads, ranged reads,
//! server-side copies) from data held entirely in process memory. Tests
//! seed it with fixture objects, inject faults, and inspect per-operation
//! call counts afterwards.
//!
//! # Architecture
//!
//! ```text
//! S3Api (async trait) / S3Request::send
//!        |
//!        v
//! InMemoryS3 (call counters, fault injection, bucket check)
//!        |
//!        v
//! ObjectStore (objects + multipart sessions, one lock)
//!        |
//!        v
//! ContentAt (byte buffers or generated content)
//! ```
//!
//! # Example
//!
//! ```
//! use s3test_core::{InMemoryS3, S3TestConfig};
//! use s3test_model::input::{GetObjectInput, PutObjectInput};
//!
//! let s3 = InMemoryS3::new(S3TestConfig::builder().bucket("test-bucket".into()).build());
//! s3.put_object(PutObjectInput {
//!     bucket: "test-bucket".into(),
//!     key: "hello.txt".into(),
//!     body: Some("hello world".into()),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let out = s3
//!     .get_object(GetObjectInput {
//!         bucket: "test-bucket".into(),
//!         key: "hello.txt".into(),
//!         range: Some("bytes=6-".into()),
//!     })
//!     .unwrap();
//! assert_eq!(out.content_length, 5);
//! assert_eq!(out.content_range.as_deref(), Some("bytes 6-10/11"));
//! ```

pub mod api;
pub mod checksums;
pub mod config;
pub mod content;
pub mod error;
mod multipart;
mod ops;
pub mod provider;
pub mod range;
pub mod sequence;
pub mod state;
pub mod storage;

pub use api::{RequestOptions, S3Api, S3Request};
pub use config::S3TestConfig;
pub use content::{ByteContent, ContentAt, GeneratedContent, ObjectBody};
pub use error::{InjectedFault, S3TestError, S3TestResult};
pub use provider::InMemoryS3;
pub use sequence::{IdGenerator, RandomIds, SequentialIds};
pub use storage::ObjectStore;
