/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::HashMap;

use aws_smithy_types::DateTime;

pub use aws_sdk_s3::types::{
    BucketVersioningStatus, ObjectCannedAcl, Permission, ServerSideEncryption, StorageClass,
};

/// Version id reported for objects written while versioning was never enabled or suspended.
pub const NULL_VERSION_ID: &str = "null";

/// Policy for how to handle a failure of any individual object in an operation
/// involving multiple objects.
///
/// Default is to abort the operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FailedTransferPolicy {
    /// Abort the operation on any individual failure
    #[default]
    Abort,
    /// Continue the operation. Any failure will be logged and the details of all failed
    /// objects will be available in the output after the operation completes.
    Continue,
}

/// Per-upload options for access control, encryption and storage tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PutOptions {
    /// Canned ACL to apply to the object
    pub acl: Option<ObjectCannedAcl>,
    /// Server-side encryption to apply to the object at rest
    pub server_side_encryption: Option<ServerSideEncryption>,
    /// Storage class the object is stored in
    pub storage_class: Option<StorageClass>,
}

/// Result of storing a single object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PutOutcome {
    /// Entity tag of the stored object
    pub e_tag: Option<String>,
    /// Version created by the write, present when versioning is enabled
    pub version_id: Option<String>,
}

/// Result of deleting a single object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteOutcome {
    /// Version id of the delete marker or of the removed version
    pub version_id: Option<String>,
    /// True when the delete left a delete marker behind instead of removing data
    pub delete_marker: bool,
}

/// Attributes of a stored object as reported by the storage service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDetails {
    /// Size of the object in bytes
    pub content_length: u64,
    /// Entity tag of the object
    pub e_tag: Option<String>,
    /// Storage class; absent means the default `STANDARD` tier
    pub storage_class: Option<StorageClass>,
    /// Server-side encryption applied to the object
    pub server_side_encryption: Option<ServerSideEncryption>,
    /// Version id of the current version
    pub version_id: Option<String>,
    /// Time the object was last written
    pub last_modified: Option<DateTime>,
    /// User-defined metadata
    pub metadata: HashMap<String, String>,
}

/// An object's content together with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    /// Object content
    pub body: bytes::Bytes,
    /// Object attributes
    pub details: ObjectDetails,
}

/// One access grant from an object ACL.
#[derive(Debug, Clone, PartialEq)]
pub struct Grant {
    /// Grantee identity: a canonical user id, email or group URI
    pub grantee: String,
    /// Permission granted
    pub permission: Permission,
}

/// A bucket as returned by a bucket listing.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSummary {
    /// Bucket name
    pub name: String,
    /// Bucket creation time
    pub creation_date: Option<DateTime>,
    /// Region the bucket lives in, when reported
    pub region: Option<String>,
}

/// An object as returned by an object listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSummary {
    /// Object key
    pub key: String,
    /// Size of the object in bytes
    pub size: u64,
    /// Storage class name as reported by the listing
    pub storage_class: Option<String>,
    /// Time the object was last written
    pub last_modified: Option<DateTime>,
    /// Entity tag of the object
    pub e_tag: Option<String>,
}

/// A single (key, version) pair from a version listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectVersionEntry {
    /// Object key
    pub key: String,
    /// Version id, [`NULL_VERSION_ID`] for unversioned writes
    pub version_id: String,
    /// Whether this version is the current one for its key
    pub is_latest: bool,
    /// Whether this version is a delete marker rather than data
    pub is_delete_marker: bool,
}

impl ObjectVersionEntry {
    /// The identifier to use when deleting this exact version.
    pub fn identifier(&self) -> ObjectIdentifier {
        ObjectIdentifier {
            key: self.key.clone(),
            version_id: Some(self.version_id.clone()),
        }
    }
}

/// Identifies an object, or one version of it, for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    /// Object key
    pub key: String,
    /// Specific version to target; `None` targets the current version
    pub version_id: Option<String>,
}

/// Position to resume a version listing from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VersionMarker {
    /// Key to resume after
    pub key: String,
    /// Version of `key` to resume after
    pub version_id: Option<String>,
}

/// One page of a version listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VersionPage {
    /// Versions and delete markers in this page
    pub versions: Vec<ObjectVersionEntry>,
    /// Where the next page starts, `None` when the listing is complete
    pub next_marker: Option<VersionMarker>,
}

/// One page of a bucket listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BucketPage {
    /// Buckets in this page
    pub buckets: Vec<BucketSummary>,
    /// Continuation token for the next page, `None` when the listing is complete
    pub next_token: Option<String>,
}

/// One page of an object listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectPage {
    /// Objects in this page
    pub objects: Vec<ObjectSummary>,
    /// Continuation token for the next page, `None` when the listing is complete
    pub next_token: Option<String>,
}

/// A single object that a bulk delete could not remove.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedDeletion {
    /// The object or version that was not deleted
    pub identifier: ObjectIdentifier,
    /// Service error code
    pub code: Option<String>,
    /// Service error message
    pub message: Option<String>,
}

/// Result of a single bulk delete request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteObjectsOutcome {
    /// Objects and versions that were removed
    pub deleted: Vec<ObjectIdentifier>,
    /// Objects and versions that were not removed
    pub errors: Vec<FailedDeletion>,
}
