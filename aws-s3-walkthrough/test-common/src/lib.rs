/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use aws_s3_walkthrough::naming::scratch_prefix;
use aws_s3_walkthrough::storage::InMemoryStorage;
use aws_s3_walkthrough::{Client, Config};
use aws_types::region::Region;
use tempfile::TempDir;

/// Region used by the in-memory clients built here.
pub const TEST_REGION: &str = "eu-west-1";

static TEST_RUN_ID: OnceLock<String> = OnceLock::new();
static NEXT_TEST_ID: AtomicU64 = AtomicU64::new(0);

/// A bucket prefix no other call in this process returns: `base`, a random id
/// fixed for the process and a per-process counter, e.g. `copy-3f9a1c-0-`.
///
/// Buckets created from it cannot collide with those of another test or of an
/// earlier run that left buckets behind.
pub fn unique_prefix(base: &str) -> String {
    let run = TEST_RUN_ID.get_or_init(scratch_prefix);
    let id = NEXT_TEST_ID.fetch_add(1, Ordering::Relaxed);
    format!("{base}-{run}-{id}-")
}

/// A client backed by a fresh [`InMemoryStorage`] in [`TEST_REGION`]
pub fn in_memory_client() -> Client {
    in_memory_client_with_page_size(1000)
}

/// A client backed by a fresh [`InMemoryStorage`] whose listings return at most
/// `page_size` entries per page
pub fn in_memory_client_with_page_size(page_size: usize) -> Client {
    let config = Config::builder()
        .region(Region::from_static(TEST_REGION))
        .storage(InMemoryStorage::with_page_size(page_size))
        .build();
    Client::new(config)
}

/// A temporary directory for scratch files and downloads, removed on drop
pub fn scratch_dir() -> TempDir {
    TempDir::with_prefix("s3-walkthrough-").unwrap()
}

/// Download `bucket/key` into `dir` and return its content
pub async fn read_object(client: &Client, bucket: &str, key: &str, dir: &Path) -> Vec<u8> {
    let destination = dir.join("read-object").join(key);
    client.download(bucket, key, &destination).await.unwrap();
    std::fs::read(destination).unwrap()
}
