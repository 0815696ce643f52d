//! Operation outputs.

mod bucket;
mod list;
mod multipart;
mod object;

pub use bucket::GetBucketLocationOutput;
pub use list::ListObjectsV2Output;
pub use multipart::{
    AbortMultipartUploadOutput, CompleteMultipartUploadOutput, CreateMultipartUploadOutput,
    UploadPartCopyOutput, UploadPartOutput,
};
pub use object::{
    CopyObjectOutput, DeleteObjectOutput, GetObjectOutput, HeadObjectOutput, PutObjectOutput,
};
