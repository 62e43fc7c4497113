/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::client::Handle;
use crate::error::Error;
use crate::types::{Grant, ObjectDetails};

pub(crate) async fn object_details(
    handle: &Handle,
    bucket: &str,
    key: &str,
) -> Result<ObjectDetails, Error> {
    handle.storage().head_object(bucket, key).await
}

pub(crate) async fn object_grants(
    handle: &Handle,
    bucket: &str,
    key: &str,
) -> Result<Vec<Grant>, Error> {
    handle.storage().get_object_acl(bucket, key).await
}
