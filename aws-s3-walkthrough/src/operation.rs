/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Types for bucket creation
pub mod create_bucket;

/// Types for single object upload operation
pub mod upload;

/// Single object download to a local file
pub(crate) mod download;

/// Server-side copy between buckets
pub(crate) mod copy_object;

/// Single object deletion
pub(crate) mod delete_object;

/// Bucket versioning configuration
pub(crate) mod bucket_versioning;

/// Object storage class, encryption and ACL inspection
pub(crate) mod object_attributes;

/// Bucket and object enumeration
pub(crate) mod list;

/// Types for removing every object version from a bucket
pub mod delete_all_objects;

/// Bucket deletion
pub(crate) mod delete_bucket;
