/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::client::Handle;
use crate::error::Error;

pub(crate) async fn delete_object(handle: &Handle, bucket: &str, key: &str) -> Result<(), Error> {
    let outcome = handle.storage().delete_object(bucket, key).await?;
    tracing::debug!(
        bucket,
        key,
        version_id = ?outcome.version_id,
        delete_marker = outcome.delete_marker,
        "object deleted"
    );
    Ok(())
}
