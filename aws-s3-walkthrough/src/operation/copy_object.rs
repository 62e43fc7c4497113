/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::display::DisplayErrorContext;

use crate::client::Handle;

/// Server-side copy of `key` between buckets; failures are logged and reported as `false`.
pub(crate) async fn copy_object(
    handle: &Handle,
    source_bucket: &str,
    destination_bucket: &str,
    key: &str,
) -> bool {
    match handle
        .storage()
        .copy_object(source_bucket, destination_bucket, key)
        .await
    {
        Ok(version_id) => {
            tracing::debug!(
                source_bucket,
                destination_bucket,
                key,
                ?version_id,
                "object copied"
            );
            true
        }
        Err(err) => {
            tracing::warn!(
                "failed to copy `{key}` from `{source_bucket}` to `{destination_bucket}`: {}",
                DisplayErrorContext(&err)
            );
            false
        }
    }
}
