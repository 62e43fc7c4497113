/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! In-memory implementation of the ObjectStorage trait.

use std::collections::{BTreeMap, HashMap};
use std::net::Ipv4Addr;
use std::time::SystemTime;

use async_trait::async_trait;
use aws_smithy_types::DateTime;
use aws_types::region::Region;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::error::{self, Error};
use crate::storage::ObjectStorage;
use crate::types::{
    BucketPage, BucketSummary, BucketVersioningStatus, DeleteObjectsOutcome, DeleteOutcome,
    Grant, ObjectCannedAcl, ObjectDetails, ObjectIdentifier, ObjectPage, ObjectSummary,
    ObjectVersionEntry, Permission, PutOptions, PutOutcome, ServerSideEncryption, StorageClass,
    StoredObject, VersionMarker, VersionPage, NULL_VERSION_ID,
};

const DEFAULT_PAGE_SIZE: usize = 1000;
const OWNER_ID: &str = "in-memory-owner";
const ALL_USERS_URI: &str = "http://acs.amazonaws.com/groups/global/AllUsers";

/// An in-memory implementation of the [`ObjectStorage`] trait.
///
/// Emulates the parts of Amazon S3 the walkthrough exercises: globally unique bucket
/// names, versioning with delete markers, canned ACLs, server-side encryption and
/// storage class bookkeeping, and paginated listings. Suitable for tests and offline runs.
#[derive(Debug)]
pub struct InMemoryStorage {
    // bucket name -> bucket
    buckets: RwLock<BTreeMap<String, Bucket>>,
    page_size: usize,
}

#[derive(Debug)]
struct Bucket {
    region: String,
    created: DateTime,
    versioning: Option<BucketVersioningStatus>,
    // key -> versions, oldest first
    objects: BTreeMap<String, Vec<Version>>,
}

#[derive(Debug, Clone)]
struct Version {
    // `None` is the null version
    id: Option<String>,
    // `None` is a delete marker
    data: Option<ObjectData>,
}

#[derive(Debug, Clone)]
struct ObjectData {
    body: Bytes,
    e_tag: String,
    acl: ObjectCannedAcl,
    server_side_encryption: Option<ServerSideEncryption>,
    storage_class: StorageClass,
    last_modified: DateTime,
    metadata: HashMap<String, String>,
}

impl Version {
    fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or(NULL_VERSION_ID)
    }

    fn matches(&self, version_id: &str) -> bool {
        self.id_str() == version_id
    }
}

impl ObjectData {
    fn details(&self, version_id: Option<&str>) -> ObjectDetails {
        // STANDARD is never reported explicitly
        let storage_class = match self.storage_class {
            StorageClass::Standard => None,
            ref other => Some(other.clone()),
        };
        ObjectDetails {
            content_length: self.body.len() as u64,
            e_tag: Some(self.e_tag.clone()),
            storage_class,
            server_side_encryption: self.server_side_encryption.clone(),
            version_id: version_id.map(str::to_owned),
            last_modified: Some(self.last_modified),
            metadata: self.metadata.clone(),
        }
    }

    fn grants(&self) -> Vec<Grant> {
        let mut grants = vec![Grant {
            grantee: OWNER_ID.to_owned(),
            permission: Permission::FullControl,
        }];
        match self.acl {
            ObjectCannedAcl::PublicRead => grants.push(Grant {
                grantee: ALL_USERS_URI.to_owned(),
                permission: Permission::Read,
            }),
            ObjectCannedAcl::PublicReadWrite => {
                grants.push(Grant {
                    grantee: ALL_USERS_URI.to_owned(),
                    permission: Permission::Read,
                });
                grants.push(Grant {
                    grantee: ALL_USERS_URI.to_owned(),
                    permission: Permission::Write,
                });
            }
            _ => {}
        }
        grants
    }
}

impl Bucket {
    fn versioning_enabled(&self) -> bool {
        self.versioning == Some(BucketVersioningStatus::Enabled)
    }

    /// The current data version of `key`, if it exists and is not a delete marker.
    fn current(&self, key: &str) -> Option<(&Version, &ObjectData)> {
        let version = self.objects.get(key)?.last()?;
        version.data.as_ref().map(|data| (version, data))
    }

    /// The version id a reader sees for a version; the null version is only
    /// reported once versioning has been configured.
    fn reported_id<'a>(&self, version: &'a Version) -> Option<&'a str> {
        match (&version.id, &self.versioning) {
            (Some(id), _) => Some(id.as_str()),
            (None, Some(_)) => Some(NULL_VERSION_ID),
            (None, None) => None,
        }
    }

    /// Add a new current version for `key`, returning the id of the version written.
    fn write(&mut self, key: &str, data: Option<ObjectData>) -> Option<String> {
        let enabled = self.versioning_enabled();
        let versions = self.objects.entry(key.to_owned()).or_default();
        if enabled {
            let id = uuid::Uuid::new_v4().simple().to_string();
            versions.push(Version {
                id: Some(id.clone()),
                data,
            });
            Some(id)
        } else {
            versions.retain(|v| v.id.is_some());
            versions.push(Version { id: None, data });
            self.versioning.as_ref().map(|_| NULL_VERSION_ID.to_owned())
        }
    }

    /// Permanently remove one version of `key`. Missing versions are not an error.
    fn remove_version(&mut self, key: &str, version_id: &str) {
        if let Some(versions) = self.objects.get_mut(key) {
            versions.retain(|v| !v.matches(version_id));
            if versions.is_empty() {
                self.objects.remove(key);
            }
        }
    }

    /// Delete the current version of `key` the way an unqualified DELETE does.
    fn delete_current(&mut self, key: &str) -> DeleteOutcome {
        match self.versioning {
            Some(_) => {
                let version_id = self.write(key, None);
                DeleteOutcome {
                    version_id,
                    delete_marker: true,
                }
            }
            None => {
                self.objects.remove(key);
                DeleteOutcome::default()
            }
        }
    }

    /// Every version of every key, ordered by key and then newest first.
    fn version_entries(&self) -> Vec<ObjectVersionEntry> {
        self.objects
            .iter()
            .flat_map(|(key, versions)| {
                let latest = versions.len().saturating_sub(1);
                versions
                    .iter()
                    .enumerate()
                    .rev()
                    .map(move |(idx, version)| ObjectVersionEntry {
                        key: key.clone(),
                        version_id: version.id_str().to_owned(),
                        is_latest: idx == latest,
                        is_delete_marker: version.data.is_none(),
                    })
            })
            .collect()
    }
}

impl InMemoryStorage {
    /// Create a new, empty in-memory storage backend.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create a new in-memory storage backend whose listings return at most
    /// `page_size` entries per page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            buckets: RwLock::new(BTreeMap::new()),
            page_size: page_size.max(1),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn no_such_bucket(bucket: &str) -> Error {
    error::not_found(format!("NoSuchBucket: the bucket `{bucket}` does not exist"))
}

fn no_such_key(bucket: &str, key: &str) -> Error {
    error::not_found(format!("NoSuchKey: `{key}` does not exist in bucket `{bucket}`"))
}

fn validate_bucket_name(name: &str) -> Result<(), Error> {
    let invalid = |reason: &str| {
        Err(error::invalid_input(format!("InvalidBucketName: `{name}`: {reason}")))
    };

    if !(3..=63).contains(&name.len()) {
        return invalid("bucket name must be between 3 and 63 characters long");
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
    {
        return invalid(
            "bucket name must only contain lowercase letters, numbers, hyphens, and dots",
        );
    }
    let bytes = name.as_bytes();
    let edge_ok = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    if !edge_ok(bytes[0]) || !edge_ok(bytes[bytes.len() - 1]) {
        return invalid("bucket name must start and end with a letter or number");
    }
    if name.contains("..") {
        return invalid("bucket name must not contain consecutive dots");
    }
    if name.parse::<Ipv4Addr>().is_ok() {
        return invalid("bucket name must not be formatted as an IP address");
    }
    Ok(())
}

fn e_tag_for(body: &Bytes) -> String {
    // FNV-1a, good enough to tell contents apart
    let hash = body.iter().fold(0xcbf2_9ce4_8422_2325_u64, |acc, b| {
        (acc ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
    });
    format!("\"{hash:016x}\"")
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn create_bucket(&self, bucket: &str, region: &Region) -> Result<Option<String>, Error> {
        validate_bucket_name(bucket)?;

        let mut buckets = self.buckets.write().await;
        if buckets.contains_key(bucket) {
            return Err(error::conflict(format!(
                "BucketAlreadyOwnedByYou: `{bucket}` already exists"
            )));
        }
        buckets.insert(
            bucket.to_owned(),
            Bucket {
                region: region.as_ref().to_owned(),
                created: DateTime::from(SystemTime::now()),
                versioning: None,
                objects: BTreeMap::new(),
            },
        );
        Ok(Some(format!("/{bucket}")))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        options: &PutOptions,
    ) -> Result<PutOutcome, Error> {
        let mut buckets = self.buckets.write().await;
        let state = buckets
            .get_mut(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?;

        let e_tag = e_tag_for(&body);
        let data = ObjectData {
            body,
            e_tag: e_tag.clone(),
            acl: options.acl.clone().unwrap_or(ObjectCannedAcl::Private),
            server_side_encryption: options.server_side_encryption.clone(),
            storage_class: options
                .storage_class
                .clone()
                .unwrap_or(StorageClass::Standard),
            last_modified: DateTime::from(SystemTime::now()),
            metadata: HashMap::new(),
        };
        let version_id = state.write(key, Some(data));

        Ok(PutOutcome {
            e_tag: Some(e_tag),
            version_id,
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject, Error> {
        let buckets = self.buckets.read().await;
        let state = buckets.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        let (version, data) = state.current(key).ok_or_else(|| no_such_key(bucket, key))?;

        Ok(StoredObject {
            body: data.body.clone(),
            details: data.details(state.reported_id(version)),
        })
    }

    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectDetails, Error> {
        let buckets = self.buckets.read().await;
        let state = buckets.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        let (version, data) = state.current(key).ok_or_else(|| no_such_key(bucket, key))?;
        Ok(data.details(state.reported_id(version)))
    }

    async fn get_object_acl(&self, bucket: &str, key: &str) -> Result<Vec<Grant>, Error> {
        let buckets = self.buckets.read().await;
        let state = buckets.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        let (_, data) = state.current(key).ok_or_else(|| no_such_key(bucket, key))?;
        Ok(data.grants())
    }

    async fn copy_object(
        &self,
        source_bucket: &str,
        destination_bucket: &str,
        key: &str,
    ) -> Result<Option<String>, Error> {
        let mut buckets = self.buckets.write().await;
        let source = buckets
            .get(source_bucket)
            .ok_or_else(|| no_such_bucket(source_bucket))?;
        let (_, data) = source
            .current(key)
            .ok_or_else(|| no_such_key(source_bucket, key))?;

        // content, encryption and metadata travel with the copy; ACL and tier reset
        let copied = ObjectData {
            acl: ObjectCannedAcl::Private,
            storage_class: StorageClass::Standard,
            last_modified: DateTime::from(SystemTime::now()),
            ..data.clone()
        };

        let destination = buckets
            .get_mut(destination_bucket)
            .ok_or_else(|| no_such_bucket(destination_bucket))?;
        Ok(destination.write(key, Some(copied)))
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<DeleteOutcome, Error> {
        let mut buckets = self.buckets.write().await;
        let state = buckets
            .get_mut(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?;
        Ok(state.delete_current(key))
    }

    async fn list_object_versions(
        &self,
        bucket: &str,
        marker: Option<VersionMarker>,
    ) -> Result<VersionPage, Error> {
        let buckets = self.buckets.read().await;
        let state = buckets.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        let entries = state.version_entries();

        let start = match &marker {
            None => 0,
            Some(marker) => {
                let exact = marker.version_id.as_deref().and_then(|version_id| {
                    entries
                        .iter()
                        .position(|e| e.key == marker.key && e.version_id == version_id)
                });
                match exact {
                    Some(idx) => idx + 1,
                    // resume with the first key after the marker key
                    None => entries
                        .iter()
                        .position(|e| e.key > marker.key)
                        .unwrap_or(entries.len()),
                }
            }
        };

        let versions: Vec<ObjectVersionEntry> = entries
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();
        let next_marker = if start + versions.len() < entries.len() {
            versions.last().map(|last| VersionMarker {
                key: last.key.clone(),
                version_id: Some(last.version_id.clone()),
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
        if objects.len() > super::MAX_DELETE_BATCH_SIZE {
            return Err(error::invalid_input(format!(
                "MalformedXML: {} keys exceed the limit of {} per request",
                objects.len(),
                super::MAX_DELETE_BATCH_SIZE
            )));
        }

        let mut buckets = self.buckets.write().await;
        let state = buckets
            .get_mut(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?;

        let mut outcome = DeleteObjectsOutcome::default();
        for identifier in objects {
            match &identifier.version_id {
                Some(version_id) => state.remove_version(&identifier.key, version_id),
                None => {
                    state.delete_current(&identifier.key);
                }
            }
            outcome.deleted.push(identifier);
        }
        Ok(outcome)
    }

    async fn put_bucket_versioning(&self, bucket: &str, enabled: bool) -> Result<(), Error> {
        let mut buckets = self.buckets.write().await;
        let state = buckets
            .get_mut(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?;
        state.versioning = Some(if enabled {
            BucketVersioningStatus::Enabled
        } else {
            BucketVersioningStatus::Suspended
        });
        Ok(())
    }

    async fn get_bucket_versioning(
        &self,
        bucket: &str,
    ) -> Result<Option<BucketVersioningStatus>, Error> {
        let buckets = self.buckets.read().await;
        let state = buckets.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        Ok(state.versioning.clone())
    }

    async fn list_buckets(&self, continuation_token: Option<String>) -> Result<BucketPage, Error> {
        let buckets = self.buckets.read().await;
        let mut remaining = buckets
            .iter()
            .filter(|(name, _)| Some(*name) > continuation_token.as_ref())
            .peekable();

        let mut page = BucketPage::default();
        while page.buckets.len() < self.page_size {
            let Some((name, state)) = remaining.next() else {
                break;
            };
            page.buckets.push(BucketSummary {
                name: name.clone(),
                creation_date: Some(state.created),
                region: Some(state.region.clone()),
            });
        }
        if remaining.peek().is_some() {
            page.next_token = page.buckets.last().map(|b| b.name.clone());
        }
        Ok(page)
    }

    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage, Error> {
        let buckets = self.buckets.read().await;
        let state = buckets.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;

        let mut remaining = state
            .objects
            .keys()
            .filter(|key| Some(*key) > continuation_token.as_ref())
            .filter_map(|key| state.current(key).map(|(_, data)| (key, data)))
            .peekable();

        let mut page = ObjectPage::default();
        while page.objects.len() < self.page_size {
            let Some((key, data)) = remaining.next() else {
                break;
            };
            page.objects.push(ObjectSummary {
                key: key.clone(),
                size: data.body.len() as u64,
                storage_class: Some(data.storage_class.as_str().to_owned()),
                last_modified: Some(data.last_modified),
                e_tag: Some(data.e_tag.clone()),
            });
        }
        if remaining.peek().is_some() {
            page.next_token = page.objects.last().map(|o| o.key.clone());
        }
        Ok(page)
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), Error> {
        let mut buckets = self.buckets.write().await;
        let state = buckets.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        if !state.objects.is_empty() {
            return Err(error::conflict(format!(
                "BucketNotEmpty: `{bucket}` still holds objects or versions"
            )));
        }
        buckets.remove(bucket);
        Ok(())
    }
}
