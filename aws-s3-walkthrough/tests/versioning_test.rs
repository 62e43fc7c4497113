/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::HashSet;

use aws_s3_walkthrough::types::BucketVersioningStatus;
use bytes::Bytes;
use test_common::{in_memory_client, in_memory_client_with_page_size, read_object, scratch_dir};

#[tokio::test]
async fn test_two_uploads_make_two_versions() {
    let client = in_memory_client();
    let dir = scratch_dir();
    let bucket = client.create_bucket("versionedbucket").await.unwrap();
    let bucket = bucket.bucket_name();

    assert!(client.enable_bucket_versioning(bucket).await);
    assert_eq!(
        Some(BucketVersioningStatus::Enabled),
        client.bucket_versioning(bucket).await.unwrap()
    );

    let first = client
        .upload()
        .bucket(bucket)
        .key("file.txt")
        .body(Bytes::from("f".repeat(300)))
        .send()
        .await
        .unwrap();
    let second = client
        .upload()
        .bucket(bucket)
        .key("file.txt")
        .body(Bytes::from("t".repeat(300)))
        .send()
        .await
        .unwrap();
    assert_ne!(first.version_id(), second.version_id());

    let versions = client.list_object_versions(bucket).await.unwrap();
    let ids: HashSet<_> = versions
        .iter()
        .filter(|v| v.key == "file.txt")
        .map(|v| v.version_id.as_str())
        .collect();
    assert_eq!(2, ids.len());

    let latest: Vec<_> = versions.iter().filter(|v| v.is_latest).collect();
    assert_eq!(1, latest.len());
    assert_eq!(second.version_id(), Some(latest[0].version_id.as_str()));

    let details = client.object_details(bucket, "file.txt").await.unwrap();
    assert_eq!(second.version_id(), details.version_id.as_deref());
    assert_eq!(
        "t".repeat(300).into_bytes(),
        read_object(&client, bucket, "file.txt", dir.path()).await
    );
}

#[tokio::test]
async fn test_delete_all_objects_over_many_pages() {
    let client = in_memory_client_with_page_size(7);
    let bucket = client.create_bucket("manyversions").await.unwrap();
    let bucket = bucket.bucket_name();
    assert!(client.enable_bucket_versioning(bucket).await);

    for i in 0..25 {
        for body in ["a", "b"] {
            client
                .upload()
                .bucket(bucket)
                .key(format!("key-{i:02}"))
                .body(Bytes::from(body))
                .send()
                .await
                .unwrap();
        }
    }
    client.delete_object(bucket, "key-00").await.unwrap();
    assert_eq!(51, client.list_object_versions(bucket).await.unwrap().len());

    let output = client
        .delete_all_objects()
        .bucket(bucket)
        .batch_size(20)
        .send()
        .await
        .unwrap();
    assert_eq!(51, output.objects_deleted());
    assert_eq!(3, output.delete_requests());
    assert!(output.failed().is_empty());

    assert!(client
        .list_object_versions(bucket)
        .await
        .unwrap()
        .is_empty());
    client.delete_bucket(bucket).await.unwrap();
}

#[tokio::test]
async fn test_delete_all_objects_on_empty_bucket() {
    let client = in_memory_client();
    let bucket = client.create_bucket("emptybucket").await.unwrap();

    let before = client.requests_sent();
    let output = client
        .delete_all_objects()
        .bucket(bucket.bucket_name())
        .send()
        .await
        .unwrap();
    assert_eq!(0, output.objects_deleted());
    assert_eq!(0, output.delete_requests());
    // only the version listing went out
    assert_eq!(before + 1, client.requests_sent());
}
