/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::client::Handle;
use crate::error::Error;

pub(crate) async fn delete_bucket(handle: &Handle, bucket: &str) -> Result<(), Error> {
    handle.storage().delete_bucket(bucket).await?;
    tracing::debug!(bucket, "bucket deleted");
    Ok(())
}
