//! Object CRUD, copy, and fault injection tests.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use s3test_core::checksums::compute_sha256;
    use s3test_core::{InjectedFault, S3TestError};
    use s3test_model::input::{
        CopyObjectInput, DeleteObjectInput, GetBucketLocationInput, HeadObjectInput,
        ListObjectsV2Input,
    };
    use s3test_model::{CONTENT_SHA256_KEY, S3ErrorCode, S3Operation};

    use crate::{TEST_BUCKET, body_bytes, get_input, put_input, test_store};

    fn head_input(key: &str) -> HeadObjectInput {
        HeadObjectInput {
            bucket: TEST_BUCKET.to_owned(),
            key: key.to_owned(),
        }
    }

    fn copy_input(src: &str, dst: &str) -> CopyObjectInput {
        CopyObjectInput {
            bucket: TEST_BUCKET.to_owned(),
            copy_source: format!("/{TEST_BUCKET}/{src}"),
            key: dst.to_owned(),
            metadata: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn test_should_round_trip_object() {
        let s3 = test_store();
        let put = s3
            .request(put_input("docs/readme.md", "hello, object store"))
            .send()
            .await
            .expect("put_object");

        let got = s3
            .request(get_input("docs/readme.md", None))
            .send()
            .await
            .expect("get_object");

        assert_eq!(body_bytes(&got).as_ref(), b"hello, object store");
        assert_eq!(got.content_length, 19);
        assert_eq!(got.e_tag, put.e_tag);
        assert!(got.last_modified.is_some());
        assert!(got.content_range.is_none());
    }

    #[tokio::test]
    async fn test_should_return_empty_body_for_missing_key() {
        let s3 = test_store();
        let got = s3
            .request(get_input("never/stored", None))
            .send()
            .await
            .expect("get_object on a missing key is not an error");
        assert!(body_bytes(&got).is_empty());
        assert_eq!(got.content_length, 0);
        assert!(got.e_tag.is_none());
        assert!(got.last_modified.is_none());

        let err = s3.request(head_input("never/stored")).send().await.err();
        assert!(matches!(err, Some(S3TestError::NoSuchKey { ref key }) if key == "never/stored"));
    }

    #[tokio::test]
    async fn test_should_report_digest_in_head_metadata() {
        let s3 = test_store();
        s3.request(put_input("k", "payload"))
            .send()
            .await
            .expect("put_object");
        let head = s3.request(head_input("k")).send().await.expect("head_object");
        assert_eq!(head.content_length, 7);
        assert_eq!(
            head.metadata.get(CONTENT_SHA256_KEY),
            Some(&compute_sha256(b"payload"))
        );
    }

    #[tokio::test]
    async fn test_should_verify_declared_digest_on_put() {
        let s3 = test_store();
        let digest = compute_sha256(b"checked body");

        let mut good = put_input("good", "checked body");
        good.metadata.insert(CONTENT_SHA256_KEY.to_owned(), digest.clone());
        s3.request(good).send().await.expect("matching digest");

        // Flip the lowest bit of the first nibble.
        let nibble = u8::from_str_radix(&digest[..1], 16).expect("hex digit") ^ 1;
        let flipped = format!("{nibble:x}{}", &digest[1..]);
        let mut bad = put_input("bad", "checked body");
        bad.metadata.insert(CONTENT_SHA256_KEY.to_owned(), flipped);
        let err = s3.request(bad).send().await.err();
        assert!(matches!(err, Some(S3TestError::ChecksumMismatch { .. })));
        assert!(s3.get_file("bad").is_none());

        s3.request(put_input("absent", "no digest"))
            .send()
            .await
            .expect("absent digest");
        assert_eq!(s3.store().len(), 2);
    }

    #[tokio::test]
    async fn test_should_copy_object_with_same_digest_and_etag() {
        let s3 = test_store();
        s3.request(put_input("src", "copy me"))
            .send()
            .await
            .expect("put_object");
        let src_before = s3.request(head_input("src")).send().await.expect("head src");

        let copied = s3
            .request(copy_input("src", "dst"))
            .send()
            .await
            .expect("copy_object")
            .copy_object_result
            .expect("copy result");
        assert_eq!(copied.e_tag, src_before.e_tag);

        let dst = s3.request(head_input("dst")).send().await.expect("head dst");
        assert_eq!(dst.metadata, src_before.metadata);
        assert_eq!(dst.e_tag, src_before.e_tag);

        let src_after = s3.request(head_input("src")).send().await.expect("head src");
        assert_eq!(src_after.e_tag, src_before.e_tag);
        assert_eq!(
            s3.get_file_bytes("src").expect("src bytes").as_ref(),
            b"copy me"
        );
        assert_eq!(
            s3.get_file_bytes("dst").expect("dst bytes").as_ref(),
            b"copy me"
        );
    }

    #[tokio::test]
    async fn test_should_reject_copy_with_wrong_digest_or_missing_source() {
        let s3 = test_store();
        s3.set_file("src", "copy me");

        let mut input = copy_input("src", "dst");
        input
            .metadata
            .insert(CONTENT_SHA256_KEY.to_owned(), compute_sha256(b"other"));
        let err = s3.request(input).send().await.err();
        assert!(matches!(err, Some(S3TestError::ChecksumMismatch { .. })));
        assert!(s3.get_file("dst").is_none());

        let err = s3.request(copy_input("nope", "dst")).send().await.err();
        assert!(matches!(err, Some(S3TestError::NoSuchKey { .. })));

        let mut foreign = copy_input("src", "dst");
        foreign.copy_source = "other-bucket/src".to_owned();
        let err = s3.request(foreign).send().await.err();
        assert_eq!(err.map(|e| e.code()), Some(S3ErrorCode::NoSuchBucket));
    }

    #[tokio::test]
    async fn test_should_list_and_delete_by_prefix() {
        let s3 = test_store();
        for key in ["logs/b", "logs/a", "data/x", "logs/c"] {
            s3.set_file(key, key.to_owned());
        }

        let listed = s3
            .request(ListObjectsV2Input {
                bucket: TEST_BUCKET.to_owned(),
                prefix: Some("logs/".to_owned()),
            })
            .send()
            .await
            .expect("list_objects_v2");
        let keys: Vec<_> = listed.contents.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, ["logs/a", "logs/b", "logs/c"]);
        assert_eq!(listed.key_count, 3);
        assert!(!listed.is_truncated);

        s3.request(DeleteObjectInput {
            bucket: TEST_BUCKET.to_owned(),
            key: "logs/b".to_owned(),
        })
        .send()
        .await
        .expect("delete_object");
        s3.request(DeleteObjectInput {
            bucket: TEST_BUCKET.to_owned(),
            key: "logs/b".to_owned(),
        })
        .send()
        .await
        .expect("deleting a missing key succeeds");
        assert!(s3.get_file("logs/b").is_none());
        assert_eq!(s3.store().len(), 3);
    }

    #[tokio::test]
    async fn test_should_report_bucket_location() {
        let s3 = test_store();
        let out = s3
            .request(GetBucketLocationInput {
                bucket: TEST_BUCKET.to_owned(),
            })
            .send()
            .await
            .expect("get_bucket_location");
        assert_eq!(out.location_constraint.as_deref(), Some("us-east-1"));
    }

    #[tokio::test]
    async fn test_should_return_fault_from_every_operation() {
        let s3 = test_store();
        s3.set_file("k", "before");
        s3.set_fault(Some(InjectedFault::new(
            S3ErrorCode::ServiceUnavailable,
            "injected",
        )));

        let put = s3.request(put_input("k", "after")).send().await.err();
        let get = s3.request(get_input("k", None)).send().await.err();
        let head = s3.request(head_input("k")).send().await.err();
        let copy = s3.request(copy_input("k", "k2")).send().await.err();
        let delete = s3
            .request(DeleteObjectInput {
                bucket: TEST_BUCKET.to_owned(),
                key: "k".to_owned(),
            })
            .send()
            .await
            .err();
        for err in [put, get, head, copy, delete] {
            let err = err.expect("operation should fail while a fault is set");
            assert!(matches!(err, S3TestError::Injected(_)));
            assert_eq!(err.code(), S3ErrorCode::ServiceUnavailable);
            assert!(err.is_retryable());
        }

        assert_eq!(s3.get_file_bytes("k").expect("k").as_ref(), b"before");
        assert!(s3.get_file("k2").is_none());

        s3.set_fault(None);
        s3.request(put_input("k", "after"))
            .send()
            .await
            .expect("put after clearing fault");
        assert_eq!(s3.get_file_bytes("k").expect("k").as_ref(), b"after");
    }

    #[tokio::test]
    async fn test_should_count_failed_calls() {
        let s3 = test_store();
        for _ in 0..3 {
            let _ = s3.request(head_input("missing")).send().await;
        }
        let _ = s3.request(get_input("missing", None)).send().await;

        let mut wrong_bucket = put_input("k", "v");
        wrong_bucket.bucket = "elsewhere".to_owned();
        let err = s3.request(wrong_bucket).send().await.err();
        assert!(matches!(err, Some(S3TestError::BucketMismatch { .. })));

        assert_eq!(s3.api_count(S3Operation::HeadObject), 3);
        assert_eq!(s3.api_count(S3Operation::GetObject), 1);
        assert_eq!(s3.api_count(S3Operation::PutObject), 1);
        assert_eq!(s3.api_count(S3Operation::DeleteObject), 0);

        s3.reset();
        assert_eq!(s3.api_count(S3Operation::HeadObject), 0);
    }
}
