//! Concurrent access tests against one shared store.

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use std::thread;

    use futures::future::join_all;
    use s3test_model::input::{
        CompleteMultipartUploadInput, CreateMultipartUploadInput, UploadPartInput,
    };
    use s3test_model::types::CompletedMultipartUpload;
    use s3test_model::{S3Operation, StreamingBlob};

    use crate::{TEST_BUCKET, body_bytes, get_input, put_input, test_store};

    const WRITERS: usize = 8;
    const KEYS_PER_WRITER: usize = 50;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_store_every_concurrent_put() {
        let s3 = test_store();

        let tasks = (0..WRITERS).map(|w| {
            let s3 = Arc::clone(&s3);
            tokio::spawn(async move {
                for k in 0..KEYS_PER_WRITER {
                    let key = format!("writer-{w}/key-{k}");
                    s3.request(put_input(&key, key.clone()))
                        .send()
                        .await
                        .expect("put_object");
                }
            })
        });
        for joined in join_all(tasks).await {
            joined.expect("writer task");
        }

        assert_eq!(s3.store().len(), WRITERS * KEYS_PER_WRITER);
        assert_eq!(
            s3.api_count(S3Operation::PutObject),
            (WRITERS * KEYS_PER_WRITER) as u64
        );

        let etags: HashSet<_> = s3
            .store()
            .list_prefix("")
            .into_iter()
            .map(|o| o.etag)
            .collect();
        assert_eq!(etags.len(), WRITERS * KEYS_PER_WRITER);

        let got = s3
            .request(get_input("writer-3/key-17", None))
            .send()
            .await
            .expect("get_object");
        assert_eq!(body_bytes(&got).as_ref(), b"writer-3/key-17");
    }

    #[test]
    fn test_should_never_expose_torn_writes() {
        let s3 = test_store();
        s3.set_file("shared", vec![0u8; 4096]);

        let writers: Vec<_> = (1..=4u8)
            .map(|fill| {
                let s3 = Arc::clone(&s3);
                thread::spawn(move || {
                    for _ in 0..100 {
                        s3.put_object(put_input("shared", vec![fill; 4096]))
                            .expect("put_object");
                    }
                })
            })
            .collect();
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let s3 = Arc::clone(&s3);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let got = s3
                            .get_object(get_input("shared", Some("bytes=1024-3071")))
                            .expect("get_object");
                        let body = body_bytes(&got);
                        assert_eq!(body.len(), 2048);
                        assert!(body.iter().all(|&b| b == body[0]), "torn read");
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().expect("thread");
        }

        let last = s3.get_file_bytes("shared").expect("shared");
        assert_eq!(last.len(), 4096);
        assert!((1..=4).contains(&last[0]));
        assert!(last.iter().all(|&b| b == last[0]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_assemble_parts_uploaded_in_parallel() {
        let s3 = test_store();
        let upload_id = s3
            .request(CreateMultipartUploadInput {
                bucket: TEST_BUCKET.to_owned(),
                key: "parallel".to_owned(),
                metadata: HashMap::new(),
            })
            .send()
            .await
            .expect("create_multipart_upload")
            .upload_id
            .expect("upload_id");

        let parts = (1..=16).rev().map(|n: i32| {
            let s3 = Arc::clone(&s3);
            let upload_id = upload_id.clone();
            tokio::spawn(async move {
                s3.request(UploadPartInput {
                    body: Some(StreamingBlob::new(format!("[{n:02}]"))),
                    bucket: TEST_BUCKET.to_owned(),
                    key: "parallel".to_owned(),
                    part_number: n,
                    upload_id,
                })
                .send()
                .await
                .expect("upload_part");
            })
        });
        for joined in join_all(parts).await {
            joined.expect("part task");
        }

        s3.request(CompleteMultipartUploadInput {
            bucket: TEST_BUCKET.to_owned(),
            key: "parallel".to_owned(),
            multipart_upload: Some(CompletedMultipartUpload::from_part_numbers(1..=16)),
            upload_id,
        })
        .send()
        .await
        .expect("complete_multipart_upload");

        let expected: String = (1..=16).map(|n| format!("[{n:02}]")).collect();
        assert_eq!(
            s3.get_file_bytes("parallel").expect("bytes").as_ref(),
            expected.as_bytes()
        );
        assert_eq!(s3.api_count(S3Operation::UploadPart), 16);
    }
}
