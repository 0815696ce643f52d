//! Ranged read tests, including generated content.

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::sync::Arc;

    use s3test_core::GeneratedContent;
    use s3test_core::range::{ByteRange, parse_byte_range};

    use crate::{body_bytes, get_input, test_store};

    fn hundred_bytes() -> Vec<u8> {
        (0..100u8).collect()
    }

    #[tokio::test]
    async fn test_should_read_open_ended_tail() {
        let s3 = test_store();
        s3.set_file("f", hundred_bytes());

        let got = s3
            .request(get_input("f", Some("bytes=90-")))
            .send()
            .await
            .expect("get_object");
        assert_eq!(got.content_length, 10);
        assert_eq!(got.content_range.as_deref(), Some("bytes 90-99/100"));
        assert_eq!(body_bytes(&got).as_ref(), &hundred_bytes()[90..]);
    }

    #[tokio::test]
    async fn test_should_read_suffix_and_clamped_ranges() {
        let s3 = test_store();
        s3.set_file("f", hundred_bytes());

        let suffix = s3
            .request(get_input("f", Some("bytes=-5")))
            .send()
            .await
            .expect("suffix range");
        assert_eq!(suffix.content_range.as_deref(), Some("bytes 95-99/100"));
        assert_eq!(body_bytes(&suffix).as_ref(), &[95, 96, 97, 98, 99]);

        let clamped = s3
            .request(get_input("f", Some("bytes=98-1000")))
            .send()
            .await
            .expect("clamped range");
        assert_eq!(clamped.content_range.as_deref(), Some("bytes 98-99/100"));
        assert_eq!(clamped.content_length, 2);
    }

    #[tokio::test]
    async fn test_should_fall_back_to_full_body_on_bad_range() {
        let s3 = test_store();
        s3.set_file("f", hundred_bytes());

        for spec in ["items=0-1", "bytes=abc-5", "bytes=100-", "bytes=-0"] {
            let got = s3
                .request(get_input("f", Some(spec)))
                .send()
                .await
                .expect("bad ranges degrade to a full read");
            assert_eq!(got.content_length, 100, "range {spec}");
            assert!(got.content_range.is_none(), "range {spec}");
        }
    }

    #[tokio::test]
    async fn test_should_read_window_of_generated_content() {
        let s3 = test_store();
        let content = Arc::new(GeneratedContent::new(10 * 1024 * 1024, 7));
        s3.set_file_content("generated", content.clone());

        let got = s3
            .request(get_input("generated", Some("bytes=5000000-5000009")))
            .send()
            .await
            .expect("get_object");
        let expected: Vec<u8> = (5_000_000..5_000_010)
            .map(|offset| content.byte_at(offset))
            .collect();
        assert_eq!(body_bytes(&got).as_ref(), expected.as_slice());
        assert_eq!(
            got.content_range.as_deref(),
            Some("bytes 5000000-5000009/10485760")
        );
    }

    #[tokio::test]
    async fn test_should_serve_terabyte_object_lazily() {
        let s3 = test_store();
        let size = 1u64 << 40;
        let content = Arc::new(GeneratedContent::new(size, 3));
        s3.set_file_content_with_sha256("terabyte", content.clone(), "not-computed");

        let got = s3
            .request(get_input("terabyte", None))
            .send()
            .await
            .expect("get_object");
        assert_eq!(got.content_length, size);
        assert!(got.content_range.is_none());

        let mut body = got.body.expect("body");
        let mut head = [0u8; 64];
        body.read_exact(&mut head).expect("read head");
        let expected: Vec<u8> = (0..64).map(|offset| content.byte_at(offset)).collect();
        assert_eq!(&head[..], expected.as_slice());
        assert_eq!(body.remaining(), size - 64);
    }

    #[tokio::test]
    async fn test_should_omit_content_range_for_whole_object() {
        let s3 = test_store();
        s3.set_file("f", hundred_bytes());
        for spec in ["bytes=0-", "bytes=-100", "bytes=0-99"] {
            let got = s3
                .request(get_input("f", Some(spec)))
                .send()
                .await
                .expect("get_object");
            assert_eq!(got.content_length, 100, "range {spec}");
            assert!(got.content_range.is_none(), "range {spec}");
        }
    }

    #[test]
    fn test_should_parse_every_explicit_range() {
        let length = 64;
        for start in 0..length {
            for last in start..length {
                let spec = format!("bytes={start}-{last}");
                assert_eq!(
                    parse_byte_range(&spec, length).ok(),
                    ByteRange::new(start, last),
                    "{spec}"
                );
            }
        }
    }

    #[test]
    fn test_should_parse_every_suffix_range() {
        for length in 1..64u64 {
            for n in 1..=length {
                let spec = format!("bytes=-{n}");
                assert_eq!(
                    parse_byte_range(&spec, length).ok(),
                    ByteRange::new(length - n, length - 1),
                    "{spec} of {length}"
                );
            }
        }
    }
}
