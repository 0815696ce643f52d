//! Operation inputs.

mod bucket;
mod list;
mod multipart;
mod object;

pub use bucket::GetBucketLocationInput;
pub use list::ListObjectsV2Input;
pub use multipart::{
    AbortMultipartUploadInput, CompleteMultipartUploadInput, CreateMultipartUploadInput,
    UploadPartCopyInput, UploadPartInput,
};
pub use object::{
    CopyObjectInput, DeleteObjectInput, GetObjectInput, HeadObjectInput, PutObjectInput,
};
