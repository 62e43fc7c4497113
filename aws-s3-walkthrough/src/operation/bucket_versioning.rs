/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::display::DisplayErrorContext;

use crate::client::Handle;
use crate::error::Error;
use crate::types::BucketVersioningStatus;

/// Turn versioning on for `bucket`; failures are logged and reported as `false`.
pub(crate) async fn enable_bucket_versioning(handle: &Handle, bucket: &str) -> bool {
    if let Err(err) = handle.storage().put_bucket_versioning(bucket, true).await {
        tracing::warn!(
            "failed to enable versioning on `{bucket}`: {}",
            DisplayErrorContext(&err)
        );
        return false;
    }

    match handle.storage().get_bucket_versioning(bucket).await {
        Ok(status) => {
            tracing::info!(
                bucket,
                status = status.as_ref().map_or("Unset", |s| s.as_str()),
                "versioning configured"
            );
            true
        }
        Err(err) => {
            tracing::warn!(
                "versioning enabled on `{bucket}` but its status could not be read: {}",
                DisplayErrorContext(&err)
            );
            true
        }
    }
}

pub(crate) async fn bucket_versioning(
    handle: &Handle,
    bucket: &str,
) -> Result<Option<BucketVersioningStatus>, Error> {
    handle.storage().get_bucket_versioning(bucket).await
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::get_bucket_versioning::GetBucketVersioningOutput;
    use aws_sdk_s3::operation::put_bucket_versioning::{
        PutBucketVersioningError, PutBucketVersioningOutput,
    };
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use aws_smithy_runtime::test_util::capture_test_logs::capture_test_logs;
    use aws_smithy_types::error::ErrorMetadata;
    use aws_types::region::Region;

    use crate::storage::InMemoryStorage;
    use crate::types::BucketVersioningStatus;
    use crate::{Client, Config};

    #[tokio::test]
    async fn test_enable_versioning_sends_enabled_status() {
        let put_versioning = mock!(aws_sdk_s3::Client::put_bucket_versioning)
            .match_requests(|r| {
                r.bucket() == Some("test-bucket")
                    && r.versioning_configuration().and_then(|c| c.status())
                        == Some(&BucketVersioningStatus::Enabled)
            })
            .then_output(|| PutBucketVersioningOutput::builder().build());
        let get_versioning = mock!(aws_sdk_s3::Client::get_bucket_versioning).then_output(|| {
            GetBucketVersioningOutput::builder()
                .status(BucketVersioningStatus::Enabled)
                .build()
        });
        let client = mock_client!(
            aws_sdk_s3,
            RuleMode::Sequential,
            &[&put_versioning, &get_versioning]
        );
        let client = Client::new(Config::builder().client(client).build());

        assert!(client.enable_bucket_versioning("test-bucket").await);
        assert_eq!(1, put_versioning.num_calls());
        assert_eq!(1, get_versioning.num_calls());
    }

    #[tokio::test]
    async fn test_enable_versioning_failure_is_reported_not_raised() {
        let (_guard, logs) = capture_test_logs();
        let put_versioning = mock!(aws_sdk_s3::Client::put_bucket_versioning).then_error(|| {
            PutBucketVersioningError::generic(
                ErrorMetadata::builder()
                    .code("AccessDenied")
                    .message("Access Denied")
                    .build(),
            )
        });
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&put_versioning]);
        let client = Client::new(Config::builder().client(client).build());

        assert!(!client.enable_bucket_versioning("test-bucket").await);
        assert!(logs
            .contents()
            .contains("failed to enable versioning on `test-bucket`"));
    }

    #[tokio::test]
    async fn test_versioning_status_round_trip() {
        let config = Config::builder()
            .region(Region::from_static("eu-west-1"))
            .storage(InMemoryStorage::new())
            .build();
        let client = Client::new(config);
        let bucket = client.create_bucket("versionbucket").await.unwrap();
        let bucket = bucket.bucket_name();

        assert_eq!(None, client.bucket_versioning(bucket).await.unwrap());
        assert!(client.enable_bucket_versioning(bucket).await);
        assert_eq!(
            Some(BucketVersioningStatus::Enabled),
            client.bucket_versioning(bucket).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_enable_versioning_on_missing_bucket() {
        let config = Config::builder()
            .region(Region::from_static("eu-west-1"))
            .storage(InMemoryStorage::new())
            .build();
        let client = Client::new(config);
        assert!(!client.enable_bucket_versioning("no-such-bucket").await);
    }
}
