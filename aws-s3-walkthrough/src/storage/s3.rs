/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Amazon S3 implementation of the ObjectStorage trait.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, Delete, VersioningConfiguration,
};
use aws_types::region::Region;
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::Instrument;

use crate::error::{self, Error};
use crate::storage::{ObjectStorage, DEFAULT_REGION};
use crate::types::{
    BucketPage, BucketSummary, BucketVersioningStatus, DeleteObjectsOutcome, DeleteOutcome,
    FailedDeletion, Grant, ObjectDetails, ObjectIdentifier, ObjectPage, ObjectSummary,
    ObjectVersionEntry, PutOptions, PutOutcome, StoredObject, VersionMarker, VersionPage,
    NULL_VERSION_ID,
};

/// Characters left as-is in the `x-amz-copy-source` header; everything else is escaped.
const COPY_SOURCE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// [`ObjectStorage`] backed by the AWS SDK for Amazon S3.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: aws_sdk_s3::Client,
}

impl S3Storage {
    /// Wrap an S3 client.
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// The Amazon S3 client instance used to send requests.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

fn copy_source(bucket: &str, key: &str) -> String {
    let key = utf8_percent_encode(key, COPY_SOURCE_ENCODE_SET);
    format!("{bucket}/{key}")
}

fn content_length(len: Option<i64>) -> u64 {
    len.unwrap_or_default().max(0) as u64
}

fn grantee_name(grantee: Option<&aws_sdk_s3::types::Grantee>) -> String {
    grantee
        .and_then(|g| {
            g.uri()
                .or(g.id())
                .or(g.email_address())
                .or(g.display_name())
        })
        .unwrap_or("unknown")
        .to_owned()
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn create_bucket(&self, bucket: &str, region: &Region) -> Result<Option<String>, Error> {
        let mut request = self.client.create_bucket().bucket(bucket);
        // us-east-1 is the implicit default and is rejected as an explicit constraint
        if region.as_ref() != DEFAULT_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region.as_ref()))
                    .build(),
            );
        }

        let output = request
            .send()
            .instrument(tracing::debug_span!("send-create-bucket", bucket))
            .await?;
        Ok(output.location().map(str::to_owned))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        options: &PutOptions,
    ) -> Result<PutOutcome, Error> {
        let output = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_length(body.len() as i64)
            .body(ByteStream::from(body))
            .set_acl(options.acl.clone())
            .set_server_side_encryption(options.server_side_encryption.clone())
            .set_storage_class(options.storage_class.clone())
            .send()
            .instrument(tracing::debug_span!("send-put-object", bucket, key))
            .await?;

        Ok(PutOutcome {
            e_tag: output.e_tag().map(str::to_owned),
            version_id: output.version_id().map(str::to_owned),
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject, Error> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .instrument(tracing::debug_span!("send-get-object", bucket, key))
            .await?;

        let details = ObjectDetails {
            content_length: content_length(output.content_length()),
            e_tag: output.e_tag().map(str::to_owned),
            storage_class: output.storage_class().cloned(),
            server_side_encryption: output.server_side_encryption().cloned(),
            version_id: output.version_id().map(str::to_owned),
            last_modified: output.last_modified().cloned(),
            metadata: output.metadata().cloned().unwrap_or_default(),
        };
        let body = output.body.collect().await?.into_bytes();

        Ok(StoredObject { body, details })
    }

    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectDetails, Error> {
        let output = self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .instrument(tracing::debug_span!("send-head-object", bucket, key))
            .await?;

        Ok(ObjectDetails {
            content_length: content_length(output.content_length()),
            e_tag: output.e_tag().map(str::to_owned),
            storage_class: output.storage_class().cloned(),
            server_side_encryption: output.server_side_encryption().cloned(),
            version_id: output.version_id().map(str::to_owned),
            last_modified: output.last_modified().cloned(),
            metadata: output.metadata().cloned().unwrap_or_default(),
        })
    }

    async fn get_object_acl(&self, bucket: &str, key: &str) -> Result<Vec<Grant>, Error> {
        let output = self
            .client
            .get_object_acl()
            .bucket(bucket)
            .key(key)
            .send()
            .instrument(tracing::debug_span!("send-get-object-acl", bucket, key))
            .await?;

        let grants = output
            .grants()
            .iter()
            .filter_map(|grant| {
                grant.permission().map(|permission| Grant {
                    grantee: grantee_name(grant.grantee()),
                    permission: permission.clone(),
                })
            })
            .collect();
        Ok(grants)
    }

    async fn copy_object(
        &self,
        source_bucket: &str,
        destination_bucket: &str,
        key: &str,
    ) -> Result<Option<String>, Error> {
        let output = self
            .client
            .copy_object()
            .copy_source(copy_source(source_bucket, key))
            .bucket(destination_bucket)
            .key(key)
            .send()
            .instrument(tracing::debug_span!(
                "send-copy-object",
                source_bucket,
                destination_bucket,
                key
            ))
            .await?;
        Ok(output.version_id().map(str::to_owned))
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<DeleteOutcome, Error> {
        let output = self
            .client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .instrument(tracing::debug_span!("send-delete-object", bucket, key))
            .await?;

        Ok(DeleteOutcome {
            version_id: output.version_id().map(str::to_owned),
            delete_marker: output.delete_marker().unwrap_or(false),
        })
    }

    async fn list_object_versions(
        &self,
        bucket: &str,
        marker: Option<VersionMarker>,
    ) -> Result<VersionPage, Error> {
        let (key_marker, version_id_marker) = match marker {
            Some(marker) => (Some(marker.key), marker.version_id),
            None => (None, None),
        };

        let output = self
            .client
            .list_object_versions()
            .bucket(bucket)
            .set_key_marker(key_marker)
            .set_version_id_marker(version_id_marker)
            .send()
            .instrument(tracing::debug_span!("send-list-object-versions", bucket))
            .await?;

        let mut versions: Vec<ObjectVersionEntry> = output
            .versions()
            .iter()
            .map(|v| ObjectVersionEntry {
                key: v.key().unwrap_or_default().to_owned(),
                version_id: v.version_id().unwrap_or(NULL_VERSION_ID).to_owned(),
                is_latest: v.is_latest().unwrap_or(false),
                is_delete_marker: false,
            })
            .collect();
        let delete_markers = output
            .delete_markers()
            .iter()
            .map(|m| ObjectVersionEntry {
                key: m.key().unwrap_or_default().to_owned(),
                version_id: m.version_id().unwrap_or(NULL_VERSION_ID).to_owned(),
                is_latest: m.is_latest().unwrap_or(false),
                is_delete_marker: true,
            });
        versions.extend(delete_markers);

        // a truncated page must say where to resume, or the listing would end early
        let next_marker = if output.is_truncated().unwrap_or(false) {
            let key = output.next_key_marker().ok_or_else(|| {
                error::service_error(format!(
                    "truncated version listing of `{bucket}` has no next key marker"
                ))
            })?;
            Some(VersionMarker {
                key: key.to_owned(),
                version_id: output.next_version_id_marker().map(str::to_owned),
            })
        } else {
            None
        };

        Ok(VersionPage {
            versions,
            next_marker,
        })
    }

    async fn delete_objects(
        &self,
        bucket: &str,
        objects: Vec<ObjectIdentifier>,
    ) -> Result<DeleteObjectsOutcome, Error> {
        let identifiers = objects
            .iter()
            .map(|obj| {
                aws_sdk_s3::types::ObjectIdentifier::builder()
                    .key(obj.key.as_str())
                    .set_version_id(obj.version_id.clone())
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let delete = Delete::builder().set_objects(Some(identifiers)).build()?;

        let output = self
            .client
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .instrument(tracing::debug_span!("send-delete-objects", bucket, count = objects.len()))
            .await?;

        let deleted = output
            .deleted()
            .iter()
            .map(|d| ObjectIdentifier {
                key: d.key().unwrap_or_default().to_owned(),
                version_id: d.version_id().map(str::to_owned),
            })
            .collect();
        let errors = output
            .errors()
            .iter()
            .map(|e| FailedDeletion {
                identifier: ObjectIdentifier {
                    key: e.key().unwrap_or_default().to_owned(),
                    version_id: e.version_id().map(str::to_owned),
                },
                code: e.code().map(str::to_owned),
                message: e.message().map(str::to_owned),
            })
            .collect();

        Ok(DeleteObjectsOutcome { deleted, errors })
    }

    async fn put_bucket_versioning(&self, bucket: &str, enabled: bool) -> Result<(), Error> {
        let status = if enabled {
            BucketVersioningStatus::Enabled
        } else {
            BucketVersioningStatus::Suspended
        };

        self.client
            .put_bucket_versioning()
            .bucket(bucket)
            .versioning_configuration(VersioningConfiguration::builder().status(status).build())
            .send()
            .instrument(tracing::debug_span!("send-put-bucket-versioning", bucket))
            .await?;
        Ok(())
    }

    async fn get_bucket_versioning(
        &self,
        bucket: &str,
    ) -> Result<Option<BucketVersioningStatus>, Error> {
        let output = self
            .client
            .get_bucket_versioning()
            .bucket(bucket)
            .send()
            .instrument(tracing::debug_span!("send-get-bucket-versioning", bucket))
            .await?;
        Ok(output.status().cloned())
    }

    async fn list_buckets(&self, continuation_token: Option<String>) -> Result<BucketPage, Error> {
        let output = self
            .client
            .list_buckets()
            .set_continuation_token(continuation_token)
            .send()
            .instrument(tracing::debug_span!("send-list-buckets"))
            .await?;

        let buckets = output
            .buckets()
            .iter()
            .map(|b| BucketSummary {
                name: b.name().unwrap_or_default().to_owned(),
                creation_date: b.creation_date().cloned(),
                region: b.bucket_region().map(str::to_owned),
            })
            .collect();

        Ok(BucketPage {
            buckets,
            next_token: output.continuation_token().map(str::to_owned),
        })
    }

    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage, Error> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(continuation_token)
            .send()
            .instrument(tracing::debug_span!("send-list-objects-v2", bucket))
            .await?;

        let objects = output
            .contents()
            .iter()
            .map(|o| ObjectSummary {
                key: o.key().unwrap_or_default().to_owned(),
                size: content_length(o.size()),
                storage_class: o.storage_class().map(|c| c.as_str().to_owned()),
                last_modified: o.last_modified().cloned(),
                e_tag: o.e_tag().map(str::to_owned),
            })
            .collect();

        let next_token = if output.is_truncated().unwrap_or(false) {
            output.next_continuation_token().map(str::to_owned)
        } else {
            None
        };

        Ok(ObjectPage {
            objects,
            next_token,
        })
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), Error> {
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .instrument(tracing::debug_span!("send-delete-bucket", bucket))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::create_bucket::CreateBucketOutput;
    use aws_sdk_s3::operation::list_object_versions::ListObjectVersionsOutput;
    use aws_sdk_s3::types::{BucketLocationConstraint, DeleteMarkerEntry, ObjectVersion};
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use aws_types::region::Region;

    use super::{copy_source, S3Storage};
    use crate::error::ErrorKind;
    use crate::storage::ObjectStorage;
    use crate::types::VersionMarker;

    #[test]
    fn test_copy_source_escapes_key() {
        assert_eq!("src/plain-key.txt", copy_source("src", "plain-key.txt"));
        assert_eq!("src/dir/a%20b%2Bc", copy_source("src", "dir/a b+c"));
    }

    #[tokio::test]
    async fn test_create_bucket_sends_location_constraint() {
        let create = mock!(aws_sdk_s3::Client::create_bucket)
            .match_requests(|r| {
                let constraint = r
                    .create_bucket_configuration()
                    .and_then(|c| c.location_constraint());
                r.bucket() == Some("my-bucket")
                    && constraint == Some(&BucketLocationConstraint::EuWest1)
            })
            .then_output(|| {
                CreateBucketOutput::builder()
                    .location("http://my-bucket.s3.amazonaws.com/")
                    .build()
            });
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&create]);

        let storage = S3Storage::new(client);
        let location = storage
            .create_bucket("my-bucket", &Region::from_static("eu-west-1"))
            .await
            .unwrap();
        assert_eq!(
            Some("http://my-bucket.s3.amazonaws.com/"),
            location.as_deref()
        );
        assert_eq!(1, create.num_calls());
    }

    #[tokio::test]
    async fn test_create_bucket_in_default_region_omits_constraint() {
        let create = mock!(aws_sdk_s3::Client::create_bucket)
            .match_requests(|r| r.create_bucket_configuration().is_none())
            .then_output(|| CreateBucketOutput::builder().location("/my-bucket").build());
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&create]);

        let storage = S3Storage::new(client);
        storage
            .create_bucket("my-bucket", &Region::from_static("us-east-1"))
            .await
            .unwrap();
        assert_eq!(1, create.num_calls());
    }

    #[tokio::test]
    async fn test_version_page_includes_delete_markers() {
        let list = mock!(aws_sdk_s3::Client::list_object_versions)
            .match_requests(|r| r.key_marker() == Some("a") && r.version_id_marker() == Some("v0"))
            .then_output(|| {
                ListObjectVersionsOutput::builder()
                    .is_truncated(true)
                    .next_key_marker("c")
                    .next_version_id_marker("v3")
                    .versions(
                        ObjectVersion::builder()
                            .key("b")
                            .version_id("v1")
                            .is_latest(true)
                            .build(),
                    )
                    .delete_markers(
                        DeleteMarkerEntry::builder()
                            .key("c")
                            .version_id("v3")
                            .is_latest(true)
                            .build(),
                    )
                    .build()
            });
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&list]);

        let storage = S3Storage::new(client);
        let marker = VersionMarker {
            key: "a".to_owned(),
            version_id: Some("v0".to_owned()),
        };
        let page = storage
            .list_object_versions("bucket", Some(marker))
            .await
            .unwrap();

        assert_eq!(2, page.versions.len());
        assert!(!page.versions[0].is_delete_marker);
        assert!(page.versions[1].is_delete_marker);
        assert_eq!(
            Some(VersionMarker {
                key: "c".to_owned(),
                version_id: Some("v3".to_owned()),
            }),
            page.next_marker
        );
    }

    #[tokio::test]
    async fn test_truncated_version_page_without_marker_is_service_error() {
        let list = mock!(aws_sdk_s3::Client::list_object_versions).then_output(|| {
            ListObjectVersionsOutput::builder()
                .is_truncated(true)
                .versions(ObjectVersion::builder().key("a").version_id("v1").build())
                .build()
        });
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&list]);

        let storage = S3Storage::new(client);
        let err = storage
            .list_object_versions("bucket", None)
            .await
            .unwrap_err();
        assert_eq!(&ErrorKind::ServiceError, err.kind());
        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("no next key marker"), "{source}");
        assert_eq!(1, list.num_calls());
    }
}
