/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;
mod input;
mod output;

use std::sync::Arc;

use bytes::Bytes;
use tokio::fs;

use crate::client::Handle;
use crate::error::Error;
pub use builders::UploadFluentBuilder;
/// Request type for single object uploads
pub use input::{UploadInput, UploadInputBuilder, UploadSource};
/// Response type for single object uploads
pub use output::{UploadOutput, UploadOutputBuilder};

/// Operation struct for single object upload
#[derive(Clone, Default, Debug)]
pub(crate) struct Upload;

impl Upload {
    /// Execute a single `Upload` operation
    pub(crate) async fn orchestrate(
        handle: Arc<Handle>,
        input: UploadInput,
    ) -> Result<UploadOutput, Error> {
        let body = match &input.source {
            UploadSource::Path(path) => Bytes::from(fs::read(path).await?),
            UploadSource::Bytes(body) => body.clone(),
        };
        let content_length = body.len() as u64;

        let outcome = handle
            .storage()
            .put_object(&input.bucket, &input.key, body, &input.options)
            .await?;
        tracing::debug!(
            bucket = %input.bucket,
            key = %input.key,
            content_length,
            version_id = ?outcome.version_id,
            "object uploaded"
        );

        Ok(UploadOutput::builder()
            .e_tag(outcome.e_tag)
            .version_id(outcome.version_id)
            .content_length(content_length)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::put_object::PutObjectOutput;
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use aws_smithy_runtime::test_util::capture_test_logs::show_test_logs;
    use aws_types::region::Region;
    use bytes::Bytes;

    use crate::error::ErrorKind;
    use crate::types::{ObjectCannedAcl, ServerSideEncryption, StorageClass};
    use crate::{Client, Config};

    #[tokio::test]
    async fn test_upload_forwards_put_options() {
        let _logs = show_test_logs();
        let put_object = mock!(aws_sdk_s3::Client::put_object)
            .match_requests(|r| {
                r.bucket() == Some("test-bucket")
                    && r.key() == Some("test-key")
                    && r.acl() == Some(&ObjectCannedAcl::PublicRead)
                    && r.server_side_encryption() == Some(&ServerSideEncryption::Aes256)
                    && r.storage_class() == Some(&StorageClass::StandardIa)
                    && r.content_length() == Some(3)
            })
            .then_output(|| {
                PutObjectOutput::builder()
                    .e_tag("test-etag")
                    .version_id("v1")
                    .build()
            });
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&put_object]);
        let client = Client::new(Config::builder().client(client).build());

        let output = client
            .upload()
            .bucket("test-bucket")
            .key("test-key")
            .body(Bytes::from_static(b"sss"))
            .acl(ObjectCannedAcl::PublicRead)
            .server_side_encryption(ServerSideEncryption::Aes256)
            .storage_class(StorageClass::StandardIa)
            .send()
            .await
            .unwrap();

        assert_eq!(Some("test-etag"), output.e_tag());
        assert_eq!(Some("v1"), output.version_id());
        assert_eq!(3, output.content_length());
        assert_eq!(1, put_object.num_calls());
    }

    #[tokio::test]
    async fn test_upload_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.txt");
        std::fs::write(&path, "t".repeat(300)).unwrap();

        let config = Config::builder()
            .region(Region::from_static("eu-west-1"))
            .storage(crate::storage::InMemoryStorage::new())
            .build();
        let client = Client::new(config);
        let bucket = client.create_bucket("uploadbucket").await.unwrap();

        let output = client
            .upload()
            .bucket(bucket.bucket_name())
            .key("upload.txt")
            .source(&path)
            .send()
            .await
            .unwrap();
        assert_eq!(300, output.content_length());

        let details = client
            .object_details(bucket.bucket_name(), "upload.txt")
            .await
            .unwrap();
        assert_eq!(300, details.content_length);
    }

    #[tokio::test]
    async fn test_missing_key_is_invalid_input() {
        let config = Config::builder()
            .region(Region::from_static("eu-west-1"))
            .storage(crate::storage::InMemoryStorage::new())
            .build();
        let client = Client::new(config);

        let err = client
            .upload()
            .bucket("test-bucket")
            .body(Bytes::from_static(b"data"))
            .send()
            .await
            .unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
        assert_eq!(0, client.requests_sent());
    }

    #[tokio::test]
    async fn test_missing_source_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::builder()
            .region(Region::from_static("eu-west-1"))
            .storage(crate::storage::InMemoryStorage::new())
            .build();
        let client = Client::new(config);

        let err = client
            .upload()
            .bucket("test-bucket")
            .key("test-key")
            .source(dir.path().join("missing.txt"))
            .send()
            .await
            .unwrap_err();
        assert_eq!(&ErrorKind::IOError, err.kind());
    }
}
