/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_types::region::Region;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::naming::unique_name;

/// Output type for creating a bucket
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBucketOutput {
    /// The generated, globally unique bucket name
    pub bucket_name: String,

    /// The region the bucket was constrained to
    pub region: Region,

    /// The location reported by the service
    pub location: Option<String>,
}

impl CreateBucketOutput {
    /// The generated, globally unique bucket name
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// The region the bucket was constrained to
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The location reported by the service
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

pub(crate) async fn create_bucket(
    handle: &Handle,
    prefix: &str,
) -> Result<CreateBucketOutput, Error> {
    let region = handle.config.region().cloned().ok_or_else(|| {
        error::invalid_input("no region configured, cannot constrain the bucket location")
    })?;

    let bucket_name = unique_name(prefix);
    let location = handle
        .storage()
        .create_bucket(&bucket_name, &region)
        .await?;
    tracing::debug!(bucket = %bucket_name, %region, ?location, "bucket created");

    Ok(CreateBucketOutput {
        bucket_name,
        region,
        location,
    })
}
