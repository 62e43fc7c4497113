/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::Path;

use tokio::fs;

use crate::client::Handle;
use crate::error::Error;

/// Fetch the current version of `bucket/key` and write it to `destination`.
///
/// Parent directories of `destination` are created as needed; an existing file is overwritten.
pub(crate) async fn download(
    handle: &Handle,
    bucket: &str,
    key: &str,
    destination: &Path,
) -> Result<u64, Error> {
    let object = handle.storage().get_object(bucket, key).await?;

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(destination, &object.body).await?;

    let written = object.body.len() as u64;
    tracing::debug!(
        bucket,
        key,
        destination = %destination.display(),
        written,
        "object downloaded"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
    use aws_sdk_s3::primitives::ByteStream;
    use aws_sdk_s3::types::error::NoSuchKey;
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use aws_smithy_types::error::ErrorMetadata;

    use crate::error::ErrorKind;
    use crate::{Client, Config};

    #[tokio::test]
    async fn test_download_creates_parent_dirs() {
        let get_object = mock!(aws_sdk_s3::Client::get_object)
            .match_requests(|r| r.bucket() == Some("test-bucket") && r.key() == Some("test-key"))
            .then_output(|| {
                GetObjectOutput::builder()
                    .content_length(5)
                    .body(ByteStream::from_static(b"hello"))
                    .build()
            });
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&get_object]);
        let client = Client::new(Config::builder().client(client).build());

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("nested").join("out.txt");
        let written = client
            .download("test-bucket", "test-key", &destination)
            .await
            .unwrap();

        assert_eq!(5, written);
        assert_eq!(b"hello".to_vec(), std::fs::read(&destination).unwrap());
    }

    #[tokio::test]
    async fn test_download_missing_key_is_not_found() {
        let get_object = mock!(aws_sdk_s3::Client::get_object).then_error(|| {
            GetObjectError::NoSuchKey(
                NoSuchKey::builder()
                    .meta(ErrorMetadata::builder().code("NoSuchKey").build())
                    .build(),
            )
        });
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&get_object]);
        let client = Client::new(Config::builder().client(client).build());

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("out.txt");
        let err = client
            .download("test-bucket", "missing", &destination)
            .await
            .unwrap_err();

        assert_eq!(&ErrorKind::NotFound, err.kind());
        assert!(!destination.exists());
    }
}
