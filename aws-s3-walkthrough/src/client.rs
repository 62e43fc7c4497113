/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::Error;
use crate::operation;
use crate::storage::ObjectStorage;
use crate::types::{
    BucketSummary, BucketVersioningStatus, Grant, ObjectDetails, ObjectSummary, ObjectVersionEntry,
};
use crate::Config;

/// Walkthrough client for object storage.
///
/// Cheap to clone: every clone shares the same configuration and storage backend.
/// Build one at startup and pass it to whatever needs to talk to the service; the
/// backend is released when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations, e.g. config, storage backend
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: crate::Config,
    pub(crate) requests: AtomicU64,
}

impl Handle {
    /// The storage backend to send requests to, counting each request.
    pub(crate) fn storage(&self) -> &dyn ObjectStorage {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.config.storage().as_ref()
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        tracing::debug!(
            "releasing storage client after {} requests",
            self.requests.load(Ordering::Relaxed)
        );
    }
}

impl Client {
    /// Creates a new client from a walkthrough config.
    pub fn new(config: Config) -> Client {
        let handle = Arc::new(Handle {
            config,
            requests: AtomicU64::new(0),
        });
        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// Number of storage requests issued through this client so far.
    pub fn requests_sent(&self) -> u64 {
        self.handle.requests.load(Ordering::Relaxed)
    }

    /// Create a bucket named `prefix` followed by a random UUID, constrained to the
    /// configured region.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// async fn make_bucket(
    ///     client: &aws_s3_walkthrough::Client,
    /// ) -> Result<String, aws_s3_walkthrough::error::Error> {
    ///     let output = client.create_bucket("firstrustbucket").await?;
    ///     Ok(output.bucket_name().to_owned())
    /// }
    /// ```
    pub async fn create_bucket(
        &self,
        prefix: &str,
    ) -> Result<operation::create_bucket::CreateBucketOutput, Error> {
        operation::create_bucket::create_bucket(&self.handle, prefix).await
    }

    /// Upload a single object from a local file or an in-memory body.
    ///
    /// Constructs a fluent builder for the
    /// [`Upload`](crate::operation::upload::UploadFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use aws_s3_walkthrough::types::{ObjectCannedAcl, ServerSideEncryption};
    ///
    /// async fn upload_file(
    ///     client: &aws_s3_walkthrough::Client,
    ///     path: &std::path::Path,
    /// ) -> Result<(), aws_s3_walkthrough::error::Error> {
    ///     let output = client
    ///         .upload()
    ///         .bucket("my-bucket")
    ///         .key("my-key")
    ///         .source(path)
    ///         .acl(ObjectCannedAcl::PublicRead)
    ///         .server_side_encryption(ServerSideEncryption::Aes256)
    ///         .send()
    ///         .await?;
    ///     println!("stored version {:?}", output.version_id());
    ///     Ok(())
    /// }
    /// ```
    pub fn upload(&self) -> operation::upload::UploadFluentBuilder {
        operation::upload::UploadFluentBuilder::new(self.handle.clone())
    }

    /// Download the current version of an object to `destination`, returning the
    /// number of bytes written.
    pub async fn download(
        &self,
        bucket: &str,
        key: &str,
        destination: impl AsRef<Path>,
    ) -> Result<u64, Error> {
        operation::download::download(&self.handle, bucket, key, destination.as_ref()).await
    }

    /// Server-side copy of `key` from `source_bucket` into `destination_bucket`.
    ///
    /// Never fails outward: returns `false` and logs the cause when the copy fails.
    pub async fn copy_object(
        &self,
        source_bucket: &str,
        destination_bucket: &str,
        key: &str,
    ) -> bool {
        operation::copy_object::copy_object(&self.handle, source_bucket, destination_bucket, key)
            .await
    }

    /// Delete the current version of an object.
    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), Error> {
        operation::delete_object::delete_object(&self.handle, bucket, key).await
    }

    /// Turn on versioning for an existing bucket.
    ///
    /// Never fails outward: returns `false` and logs the cause when the change fails.
    pub async fn enable_bucket_versioning(&self, bucket: &str) -> bool {
        operation::bucket_versioning::enable_bucket_versioning(&self.handle, bucket).await
    }

    /// The versioning status of a bucket, `None` if versioning was never configured.
    pub async fn bucket_versioning(
        &self,
        bucket: &str,
    ) -> Result<Option<BucketVersioningStatus>, Error> {
        operation::bucket_versioning::bucket_versioning(&self.handle, bucket).await
    }

    /// Storage class, encryption, version and metadata of the current version of an object.
    pub async fn object_details(&self, bucket: &str, key: &str) -> Result<ObjectDetails, Error> {
        operation::object_attributes::object_details(&self.handle, bucket, key).await
    }

    /// Access grants of the current version of an object.
    pub async fn object_grants(&self, bucket: &str, key: &str) -> Result<Vec<Grant>, Error> {
        operation::object_attributes::object_grants(&self.handle, bucket, key).await
    }

    /// Every bucket owned by the caller.
    pub async fn list_buckets(&self) -> Result<Vec<BucketSummary>, Error> {
        operation::list::list_buckets(&self.handle).await
    }

    /// Every current object in a bucket.
    pub async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>, Error> {
        operation::list::list_objects(&self.handle, bucket).await
    }

    /// Every version and delete marker in a bucket.
    pub async fn list_object_versions(
        &self,
        bucket: &str,
    ) -> Result<Vec<ObjectVersionEntry>, Error> {
        operation::delete_all_objects::list_all_versions(&self.handle, bucket).await
    }

    /// Delete every version of every object in a bucket.
    ///
    /// Constructs a fluent builder for the
    /// [`DeleteAllObjects`](crate::operation::delete_all_objects::DeleteAllObjectsFluentBuilder)
    /// operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// async fn empty_bucket(
    ///     client: &aws_s3_walkthrough::Client,
    /// ) -> Result<(), aws_s3_walkthrough::error::Error> {
    ///     let output = client
    ///         .delete_all_objects()
    ///         .bucket("my-bucket")
    ///         .send()
    ///         .await?;
    ///     println!("removed {} versions", output.objects_deleted());
    ///     Ok(())
    /// }
    /// ```
    pub fn delete_all_objects(
        &self,
    ) -> operation::delete_all_objects::DeleteAllObjectsFluentBuilder {
        operation::delete_all_objects::DeleteAllObjectsFluentBuilder::new(self.handle.clone())
    }

    /// Delete an empty bucket.
    pub async fn delete_bucket(&self, bucket: &str) -> Result<(), Error> {
        operation::delete_bucket::delete_bucket(&self.handle, bucket).await
    }
}
