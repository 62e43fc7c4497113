/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
//! Storage backends for the walkthrough client.
//!
//! This module provides the [`ObjectStorage`] trait and its implementations. The
//! trait is the complete boundary between the walkthrough and the remote object
//! storage service: every operation the facade performs maps onto exactly one call
//! here, and pagination is surfaced to the caller one page at a time.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use aws_types::region::Region;
use bytes::Bytes;

use crate::error::Error;
use crate::types::{
    BucketPage, BucketVersioningStatus, DeleteObjectsOutcome, DeleteOutcome, Grant,
    ObjectDetails, ObjectIdentifier, ObjectPage, PutOptions, PutOutcome, StoredObject,
    VersionMarker, VersionPage,
};

pub(crate) mod in_memory;
pub(crate) mod s3;

pub use in_memory::InMemoryStorage;
pub use s3::S3Storage;

/// Maximum number of keys a single bulk delete request may carry.
pub const MAX_DELETE_BATCH_SIZE: usize = 1000;

/// Region implied when a bucket is created without a location constraint.
pub(crate) const DEFAULT_REGION: &str = "us-east-1";

/// An object storage service the walkthrough can drive.
///
/// Implementations are expected to be cheap to share; the client holds one behind an
/// [`Arc`] for its whole lifetime.
#[async_trait]
pub trait ObjectStorage: Send + Sync + Debug {
    /// Create a bucket constrained to `region`, returning its location.
    async fn create_bucket(&self, bucket: &str, region: &Region) -> Result<Option<String>, Error>;

    /// Store `body` under `key`.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        options: &PutOptions,
    ) -> Result<PutOutcome, Error>;

    /// Fetch the current version of an object.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject, Error>;

    /// Fetch the attributes of the current version of an object.
    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectDetails, Error>;

    /// Fetch the access grants of the current version of an object.
    async fn get_object_acl(&self, bucket: &str, key: &str) -> Result<Vec<Grant>, Error>;

    /// Server-side copy of `key` from `source_bucket` to the same key in
    /// `destination_bucket`, returning the version created in the destination.
    async fn copy_object(
        &self,
        source_bucket: &str,
        destination_bucket: &str,
        key: &str,
    ) -> Result<Option<String>, Error>;

    /// Delete the current version of an object.
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<DeleteOutcome, Error>;

    /// List one page of object versions and delete markers, starting after `marker`.
    async fn list_object_versions(
        &self,
        bucket: &str,
        marker: Option<VersionMarker>,
    ) -> Result<VersionPage, Error>;

    /// Delete up to [`MAX_DELETE_BATCH_SIZE`] objects or versions in one request.
    async fn delete_objects(
        &self,
        bucket: &str,
        objects: Vec<ObjectIdentifier>,
    ) -> Result<DeleteObjectsOutcome, Error>;

    /// Turn versioning on (`true`) or suspend it (`false`).
    async fn put_bucket_versioning(&self, bucket: &str, enabled: bool) -> Result<(), Error>;

    /// The bucket's versioning status, `None` if versioning was never configured.
    async fn get_bucket_versioning(
        &self,
        bucket: &str,
    ) -> Result<Option<BucketVersioningStatus>, Error>;

    /// List one page of buckets owned by the caller.
    async fn list_buckets(&self, continuation_token: Option<String>) -> Result<BucketPage, Error>;

    /// List one page of the current objects in a bucket.
    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage, Error>;

    /// Delete an empty bucket.
    async fn delete_bucket(&self, bucket: &str) -> Result<(), Error>;
}

/// A shared, type-erased storage backend.
pub type SharedStorage = Arc<dyn ObjectStorage>;
