/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

use crate::storage::MAX_DELETE_BATCH_SIZE;
use crate::types::FailedTransferPolicy;

/// Input type for removing every object version from a bucket
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteAllObjectsInput {
    /// The bucket to empty.
    pub bucket: String,

    /// How to handle versions that the service refuses to delete.
    pub failure_policy: FailedTransferPolicy,

    batch_size: usize,
}

impl DeleteAllObjectsInput {
    /// Creates a new builder-style object to manufacture [`DeleteAllObjectsInput`](crate::operation::delete_all_objects::DeleteAllObjectsInput).
    pub fn builder() -> DeleteAllObjectsInputBuilder {
        DeleteAllObjectsInputBuilder::default()
    }

    /// The bucket to empty.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// How to handle versions that the service refuses to delete.
    pub fn failure_policy(&self) -> &FailedTransferPolicy {
        &self.failure_policy
    }

    /// Maximum number of versions sent in one delete request.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

/// A builder for [`DeleteAllObjectsInput`](crate::operation::delete_all_objects::DeleteAllObjectsInput).
#[non_exhaustive]
#[derive(Clone, Default, Debug)]
pub struct DeleteAllObjectsInputBuilder {
    pub(crate) bucket: Option<String>,
    pub(crate) failure_policy: Option<FailedTransferPolicy>,
    pub(crate) batch_size: Option<usize>,
}

impl DeleteAllObjectsInputBuilder {
    /// The bucket to empty.
    ///
    /// This member is required.
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.bucket = Some(input.into());
        self
    }

    /// The bucket to empty.
    pub fn set_bucket(mut self, input: Option<String>) -> Self {
        self.bucket = input;
        self
    }

    /// The bucket to empty.
    pub fn get_bucket(&self) -> &Option<String> {
        &self.bucket
    }

    /// How to handle versions that the service refuses to delete.
    ///
    /// Defaults to [`FailedTransferPolicy::Abort`].
    pub fn failure_policy(mut self, input: FailedTransferPolicy) -> Self {
        self.failure_policy = Some(input);
        self
    }

    /// How to handle versions that the service refuses to delete.
    pub fn set_failure_policy(mut self, input: Option<FailedTransferPolicy>) -> Self {
        self.failure_policy = input;
        self
    }

    /// How to handle versions that the service refuses to delete.
    pub fn get_failure_policy(&self) -> &Option<FailedTransferPolicy> {
        &self.failure_policy
    }

    /// Maximum number of versions sent in one delete request.
    ///
    /// Clamped to `1..=1000`; defaults to the service maximum of 1000.
    pub fn batch_size(mut self, input: usize) -> Self {
        self.batch_size = Some(input);
        self
    }

    /// Maximum number of versions sent in one delete request.
    pub fn get_batch_size(&self) -> &Option<usize> {
        &self.batch_size
    }

    /// Consumes the builder and constructs a [`DeleteAllObjectsInput`](crate::operation::delete_all_objects::DeleteAllObjectsInput).
    pub fn build(self) -> Result<DeleteAllObjectsInput, BuildError> {
        let bucket = self
            .bucket
            .ok_or_else(|| BuildError::missing_field("bucket", "A bucket is required"))?;
        Ok(DeleteAllObjectsInput {
            bucket,
            failure_policy: self.failure_policy.unwrap_or_default(),
            batch_size: self
                .batch_size
                .unwrap_or(MAX_DELETE_BATCH_SIZE)
                .clamp(1, MAX_DELETE_BATCH_SIZE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::DeleteAllObjectsInput;
    use crate::types::FailedTransferPolicy;

    #[test]
    fn test_defaults() {
        let input = DeleteAllObjectsInput::builder()
            .bucket("test-bucket")
            .build()
            .unwrap();
        assert_eq!(&FailedTransferPolicy::Abort, input.failure_policy());
        assert_eq!(1000, input.batch_size());
    }

    #[test]
    fn test_batch_size_is_clamped() {
        let too_big = DeleteAllObjectsInput::builder()
            .bucket("test-bucket")
            .batch_size(5000)
            .build()
            .unwrap();
        assert_eq!(1000, too_big.batch_size());

        let zero = DeleteAllObjectsInput::builder()
            .bucket("test-bucket")
            .batch_size(0)
            .build()
            .unwrap();
        assert_eq!(1, zero.batch_size());
    }

    #[test]
    fn test_bucket_is_required() {
        assert!(DeleteAllObjectsInput::builder().build().is_err());
    }
}
