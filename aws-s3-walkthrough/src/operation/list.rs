/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::client::Handle;
use crate::error::Error;
use crate::types::{BucketSummary, ObjectSummary};

/// Every bucket owned by the caller, following continuation tokens to the end.
pub(crate) async fn list_buckets(handle: &Handle) -> Result<Vec<BucketSummary>, Error> {
    let mut buckets = Vec::new();
    let mut token = None;
    loop {
        let page = handle.storage().list_buckets(token).await?;
        buckets.extend(page.buckets);
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }
    tracing::debug!(count = buckets.len(), "buckets listed");
    Ok(buckets)
}

/// Every current object in `bucket`, following continuation tokens to the end.
pub(crate) async fn list_objects(
    handle: &Handle,
    bucket: &str,
) -> Result<Vec<ObjectSummary>, Error> {
    let mut objects = Vec::new();
    let mut token = None;
    loop {
        let page = handle.storage().list_objects(bucket, token).await?;
        objects.extend(page.objects);
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }
    tracing::debug!(bucket, count = objects.len(), "objects listed");
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::list_buckets::ListBucketsOutput;
    use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
    use aws_sdk_s3::types::{Bucket, Object};
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use aws_types::region::Region;
    use bytes::Bytes;

    use crate::storage::InMemoryStorage;
    use crate::{Client, Config};

    #[tokio::test]
    async fn test_list_buckets_follows_continuation_token() {
        let first_page = mock!(aws_sdk_s3::Client::list_buckets)
            .match_requests(|r| r.continuation_token().is_none())
            .then_output(|| {
                ListBucketsOutput::builder()
                    .buckets(Bucket::builder().name("bucket-a").build())
                    .continuation_token("token-1")
                    .build()
            });
        let second_page = mock!(aws_sdk_s3::Client::list_buckets)
            .match_requests(|r| r.continuation_token() == Some("token-1"))
            .then_output(|| {
                ListBucketsOutput::builder()
                    .buckets(Bucket::builder().name("bucket-b").build())
                    .build()
            });
        let client = mock_client!(
            aws_sdk_s3,
            RuleMode::Sequential,
            &[&first_page, &second_page]
        );
        let client = Client::new(Config::builder().client(client).build());

        let names: Vec<_> = client
            .list_buckets()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(vec!["bucket-a".to_owned(), "bucket-b".to_owned()], names);
        assert_eq!(2, client.requests_sent());
    }

    #[tokio::test]
    async fn test_list_objects_follows_continuation_token() {
        let first_page = mock!(aws_sdk_s3::Client::list_objects_v2)
            .match_requests(|r| {
                r.bucket() == Some("test-bucket") && r.continuation_token().is_none()
            })
            .then_output(|| {
                ListObjectsV2Output::builder()
                    .contents(Object::builder().key("a").size(1).build())
                    .is_truncated(true)
                    .next_continuation_token("next")
                    .build()
            });
        let second_page = mock!(aws_sdk_s3::Client::list_objects_v2)
            .match_requests(|r| r.continuation_token() == Some("next"))
            .then_output(|| {
                ListObjectsV2Output::builder()
                    .contents(Object::builder().key("b").size(2).build())
                    .is_truncated(false)
                    .build()
            });
        let client = mock_client!(
            aws_sdk_s3,
            RuleMode::Sequential,
            &[&first_page, &second_page]
        );
        let client = Client::new(Config::builder().client(client).build());

        let objects = client.list_objects("test-bucket").await.unwrap();
        assert_eq!(2, objects.len());
        assert_eq!("a", objects[0].key);
        assert_eq!(2, objects[1].size);
        assert_eq!(1, first_page.num_calls());
        assert_eq!(1, second_page.num_calls());
    }

    #[tokio::test]
    async fn test_listing_spans_small_pages() {
        let config = Config::builder()
            .region(Region::from_static("eu-west-1"))
            .storage(InMemoryStorage::with_page_size(2))
            .build();
        let client = Client::new(config);

        let mut created = Vec::new();
        for _ in 0..3 {
            created.push(client.create_bucket("listbucket").await.unwrap());
        }
        let bucket = created[0].bucket_name();
        for key in ["k1", "k2", "k3", "k4", "k5"] {
            client
                .upload()
                .bucket(bucket)
                .key(key)
                .body(Bytes::from_static(b"x"))
                .send()
                .await
                .unwrap();
        }

        assert_eq!(3, client.list_buckets().await.unwrap().len());
        let keys: Vec<_> = client
            .list_objects(bucket)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.key)
            .collect();
        assert_eq!(vec!["k1", "k2", "k3", "k4", "k5"], keys);
    }
}
