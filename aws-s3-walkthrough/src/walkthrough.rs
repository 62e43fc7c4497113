/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The end-to-end tour: two buckets are created, filled, inspected and torn down again.
//!
//! [`run`] issues every request serially through one [`Client`]. The first error aborts
//! the tour and is returned to the caller; buckets created up to that point are left
//! behind, as are the local scratch files.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::operation::delete_all_objects::DeleteAllObjectsOutput;
use crate::scratch::{create_scratch_file, scratch_key};
use crate::types::{
    Grant, ObjectCannedAcl, ObjectDetails, ObjectSummary, ServerSideEncryption, StorageClass,
};
use crate::Client;

const DEFAULT_FIRST_BUCKET_PREFIX: &str = "firstrustbucket";
const DEFAULT_SECOND_BUCKET_PREFIX: &str = "secondrustbucket";
const DEFAULT_DOWNLOAD_DIR: &str = "/tmp";

/// Knobs for a single tour.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkthroughConfig {
    /// Prefix of the first bucket's generated name
    pub first_bucket_prefix: String,
    /// Prefix of the second bucket's generated name
    pub second_bucket_prefix: String,
    /// Directory scratch files are written to
    pub work_dir: PathBuf,
    /// Directory the first file is downloaded into
    pub download_dir: PathBuf,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            first_bucket_prefix: DEFAULT_FIRST_BUCKET_PREFIX.to_owned(),
            second_bucket_prefix: DEFAULT_SECOND_BUCKET_PREFIX.to_owned(),
            work_dir: PathBuf::from("."),
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
        }
    }
}

/// A current object of the first bucket together with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedObject {
    /// What the object listing reported
    pub summary: ObjectSummary,
    /// What a HEAD request on the object reported
    pub details: ObjectDetails,
}

/// Everything the tour observed along the way.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct WalkthroughReport {
    /// Generated name of the first bucket
    pub first_bucket: String,
    /// Generated name of the second bucket
    pub second_bucket: String,
    /// Local scratch files that were written, in creation order
    pub scratch_files: Vec<PathBuf>,
    /// Where the first file was downloaded to
    pub downloaded_to: PathBuf,
    /// Number of bytes downloaded
    pub downloaded_bytes: u64,
    /// Whether the server-side copy into the second bucket succeeded
    pub copied: bool,
    /// Grants on the publicly readable second file
    pub public_grants: Vec<Grant>,
    /// Encryption reported for the third file
    pub encryption: Option<ServerSideEncryption>,
    /// Storage class reported for the third file after re-uploading it
    pub storage_class: Option<StorageClass>,
    /// Whether versioning was enabled on the first bucket
    pub versioning_enabled: bool,
    /// Current version id of the first file after it was overwritten
    pub current_version_id: Option<String>,
    /// Names of every bucket visible to the caller
    pub buckets: Vec<String>,
    /// Current objects of the first bucket before it was emptied
    pub first_bucket_objects: Vec<ListedObject>,
    /// Result of emptying the first bucket
    pub first_bucket_cleanup: DeleteAllObjectsOutput,
    /// Result of emptying the second bucket
    pub second_bucket_cleanup: DeleteAllObjectsOutput,
}

async fn upload_file(
    client: &Client,
    bucket: &str,
    key: &str,
    path: &Path,
) -> Result<Option<String>, Error> {
    let output = client
        .upload()
        .bucket(bucket)
        .key(key)
        .source(path)
        .send()
        .await?;
    Ok(output.version_id)
}

/// Run the whole tour with `client`.
pub async fn run(client: &Client, config: &WalkthroughConfig) -> Result<WalkthroughReport, Error> {
    // buckets
    let first = client.create_bucket(&config.first_bucket_prefix).await?;
    tracing::info!(
        bucket = first.bucket_name(),
        region = %first.region(),
        location = ?first.location(),
        "created first bucket"
    );
    let second = client.create_bucket(&config.second_bucket_prefix).await?;
    tracing::info!(
        bucket = second.bucket_name(),
        region = %second.region(),
        location = ?second.location(),
        "created second bucket"
    );
    let first_bucket = first.bucket_name();
    let second_bucket = second.bucket_name();

    // upload and download
    let first_file = create_scratch_file(&config.work_dir, 300, "firstfile.txt", "f").await?;
    let first_key = scratch_key(&first_file)?;
    upload_file(client, first_bucket, &first_key, &first_file).await?;
    tracing::info!(bucket = first_bucket, key = %first_key, "uploaded first file");

    let downloaded_to = config.download_dir.join(&first_key);
    let downloaded_bytes = client
        .download(first_bucket, &first_key, &downloaded_to)
        .await?;
    tracing::info!(
        path = %downloaded_to.display(),
        bytes = downloaded_bytes,
        "downloaded first file"
    );

    // copy, then delete the copy
    let copied = client
        .copy_object(first_bucket, second_bucket, &first_key)
        .await;
    tracing::info!(
        from = first_bucket,
        to = second_bucket,
        copied,
        "copied first file"
    );
    client.delete_object(second_bucket, &first_key).await?;
    tracing::info!(bucket = second_bucket, key = %first_key, "deleted first file");

    // public read ACL
    let second_file = create_scratch_file(&config.work_dir, 400, "secondfile.txt", "s").await?;
    let second_key = scratch_key(&second_file)?;
    client
        .upload()
        .bucket(first_bucket)
        .key(&second_key)
        .source(&second_file)
        .acl(ObjectCannedAcl::PublicRead)
        .send()
        .await?;
    let public_grants = client.object_grants(first_bucket, &second_key).await?;
    for grant in &public_grants {
        tracing::info!(
            key = %second_key,
            grantee = %grant.grantee,
            permission = grant.permission.as_str(),
            "second file grant"
        );
    }

    // encryption and storage class
    let third_file = create_scratch_file(&config.work_dir, 300, "thirdfile.txt", "t").await?;
    let third_key = scratch_key(&third_file)?;
    client
        .upload()
        .bucket(first_bucket)
        .key(&third_key)
        .source(&third_file)
        .server_side_encryption(ServerSideEncryption::Aes256)
        .send()
        .await?;
    let encryption = client
        .object_details(first_bucket, &third_key)
        .await?
        .server_side_encryption;
    tracing::info!(key = %third_key, encryption = ?encryption, "third file encryption");

    client
        .upload()
        .bucket(first_bucket)
        .key(&third_key)
        .source(&third_file)
        .server_side_encryption(ServerSideEncryption::Aes256)
        .storage_class(StorageClass::StandardIa)
        .send()
        .await?;
    let storage_class = client
        .object_details(first_bucket, &third_key)
        .await?
        .storage_class;
    tracing::info!(key = %third_key, storage_class = ?storage_class, "third file storage class");

    // versioning
    let versioning_enabled = client.enable_bucket_versioning(first_bucket).await;
    upload_file(client, first_bucket, &first_key, &first_file).await?;
    upload_file(client, first_bucket, &first_key, &third_file).await?;
    upload_file(client, first_bucket, &second_key, &second_file).await?;
    let current_version_id = client
        .object_details(first_bucket, &first_key)
        .await?
        .version_id;
    tracing::info!(
        key = %first_key,
        version_id = ?current_version_id,
        "current version of first file"
    );

    // traversal
    let buckets: Vec<String> = client
        .list_buckets()
        .await?
        .into_iter()
        .map(|b| b.name)
        .collect();
    for name in &buckets {
        tracing::info!(bucket = %name, "bucket");
    }

    let mut first_bucket_objects = Vec::new();
    for summary in client.list_objects(first_bucket).await? {
        let details = client.object_details(first_bucket, &summary.key).await?;
        tracing::info!(
            key = %summary.key,
            storage_class = ?summary.storage_class,
            last_modified = ?summary.last_modified,
            version_id = ?details.version_id,
            metadata = ?details.metadata,
            "object"
        );
        first_bucket_objects.push(ListedObject { summary, details });
    }

    // teardown
    let first_bucket_cleanup = client
        .delete_all_objects()
        .bucket(first_bucket)
        .send()
        .await?;
    tracing::info!(
        bucket = first_bucket,
        deleted = first_bucket_cleanup.objects_deleted(),
        "emptied first bucket"
    );

    upload_file(client, second_bucket, &first_key, &first_file).await?;
    let second_bucket_cleanup = client
        .delete_all_objects()
        .bucket(second_bucket)
        .send()
        .await?;
    tracing::info!(
        bucket = second_bucket,
        deleted = second_bucket_cleanup.objects_deleted(),
        "emptied second bucket"
    );

    client.delete_bucket(first_bucket).await?;
    client.delete_bucket(second_bucket).await?;
    tracing::info!(first_bucket, second_bucket, "deleted both buckets");

    Ok(WalkthroughReport {
        first_bucket: first_bucket.to_owned(),
        second_bucket: second_bucket.to_owned(),
        scratch_files: vec![first_file, second_file, third_file],
        downloaded_to,
        downloaded_bytes,
        copied,
        public_grants,
        encryption,
        storage_class,
        versioning_enabled,
        current_version_id,
        buckets,
        first_bucket_objects,
        first_bucket_cleanup,
        second_bucket_cleanup,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use aws_types::region::Region;

    use super::{run, WalkthroughConfig};
    use crate::error::ErrorKind;
    use crate::storage::InMemoryStorage;
    use crate::types::{Permission, ServerSideEncryption, StorageClass};
    use crate::{Client, Config};

    fn client(region: Option<Region>) -> Client {
        let config = Config::builder()
            .set_region(region)
            .storage(InMemoryStorage::new())
            .build();
        Client::new(config)
    }

    #[test]
    fn test_default_config() {
        let config = WalkthroughConfig::default();
        assert_eq!("firstrustbucket", config.first_bucket_prefix);
        assert_eq!("secondrustbucket", config.second_bucket_prefix);
        assert_eq!(PathBuf::from("/tmp"), config.download_dir);
    }

    #[tokio::test]
    async fn test_full_tour_in_memory() {
        let work_dir = tempfile::tempdir().unwrap();
        let download_dir = tempfile::tempdir().unwrap();
        let config = WalkthroughConfig {
            work_dir: work_dir.path().to_owned(),
            download_dir: download_dir.path().join("downloads"),
            ..Default::default()
        };
        let client = client(Some(Region::from_static("eu-west-1")));

        let report = run(&client, &config).await.unwrap();

        assert!(report.first_bucket.starts_with("firstrustbucket"));
        assert!(report.second_bucket.starts_with("secondrustbucket"));
        assert_eq!(300, report.downloaded_bytes);
        assert_eq!(
            "f".repeat(300),
            std::fs::read_to_string(&report.downloaded_to).unwrap()
        );
        assert!(report.copied);
        assert!(report
            .public_grants
            .iter()
            .any(|g| g.grantee.ends_with("/AllUsers") && g.permission == Permission::Read));
        assert_eq!(Some(ServerSideEncryption::Aes256), report.encryption);
        assert_eq!(Some(StorageClass::StandardIa), report.storage_class);
        assert!(report.versioning_enabled);
        assert!(report.current_version_id.is_some());
        assert_eq!(2, report.buckets.len());
        assert_eq!(3, report.first_bucket_objects.len());

        // first file: null version plus two versioned writes, second file: null plus one,
        // third file: a single null version
        assert_eq!(6, report.first_bucket_cleanup.objects_deleted());
        assert_eq!(1, report.second_bucket_cleanup.objects_deleted());

        assert!(client.list_buckets().await.unwrap().is_empty());
        for path in &report.scratch_files {
            assert!(path.exists(), "scratch file {} kept", path.display());
        }
    }

    #[tokio::test]
    async fn test_first_error_aborts_tour() {
        let work_dir = tempfile::tempdir().unwrap();
        let config = WalkthroughConfig {
            work_dir: work_dir.path().to_owned(),
            ..Default::default()
        };
        let client = client(None);

        let err = run(&client, &config).await.unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
        assert_eq!(0, client.requests_sent());
        assert_eq!(0, std::fs::read_dir(work_dir.path()).unwrap().count());
    }
}
