//! Records held by the object store.
//!
//! - [`object::StoredObject`] -- a committed object and its integrity data
//! - [`multipart::MultipartUpload`] -- an in-flight multipart upload

pub mod multipart;
pub mod object;
