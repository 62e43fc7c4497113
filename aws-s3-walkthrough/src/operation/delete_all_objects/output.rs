/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::types::FailedDeletion;

/// Output type for removing every object version from a bucket
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteAllObjectsOutput {
    /// The number of versions and delete markers that were removed
    pub objects_deleted: u64,

    /// The number of bulk delete requests sent
    pub delete_requests: u64,

    /// Versions the service refused to delete
    pub failed: Option<Vec<FailedDeletion>>,
}

impl DeleteAllObjectsOutput {
    /// Creates a new builder-style object to manufacture [`DeleteAllObjectsOutput`](crate::operation::delete_all_objects::DeleteAllObjectsOutput).
    pub fn builder() -> DeleteAllObjectsOutputBuilder {
        DeleteAllObjectsOutputBuilder::default()
    }

    /// The number of versions and delete markers that were removed
    pub fn objects_deleted(&self) -> u64 {
        self.objects_deleted
    }

    /// The number of bulk delete requests sent
    pub fn delete_requests(&self) -> u64 {
        self.delete_requests
    }

    /// A slice of versions the service refused to delete
    ///
    /// Only populated with [`FailedTransferPolicy::Continue`](crate::types::FailedTransferPolicy::Continue).
    pub fn failed(&self) -> &[FailedDeletion] {
        self.failed.as_deref().unwrap_or_default()
    }
}

/// A builder for [`DeleteAllObjectsOutput`](crate::operation::delete_all_objects::DeleteAllObjectsOutput).
#[non_exhaustive]
#[derive(Debug, Default)]
pub struct DeleteAllObjectsOutputBuilder {
    pub(crate) objects_deleted: u64,
    pub(crate) delete_requests: u64,
    pub(crate) failed: Option<Vec<FailedDeletion>>,
}

impl DeleteAllObjectsOutputBuilder {
    /// The number of versions and delete markers that were removed
    pub fn objects_deleted(mut self, input: u64) -> Self {
        self.objects_deleted = input;
        self
    }

    /// The number of bulk delete requests sent
    pub fn delete_requests(mut self, input: u64) -> Self {
        self.delete_requests = input;
        self
    }

    /// Append a failed deletion.
    ///
    /// To override the contents of this collection use [`set_failed`](Self::set_failed)
    pub fn failed(mut self, input: FailedDeletion) -> Self {
        self.failed.get_or_insert_with(Vec::new).push(input);
        self
    }

    /// Versions the service refused to delete
    pub fn set_failed(mut self, input: Option<Vec<FailedDeletion>>) -> Self {
        self.failed = input;
        self
    }

    /// Consume the builder and return the output
    pub fn build(self) -> DeleteAllObjectsOutput {
        DeleteAllObjectsOutput {
            objects_deleted: self.objects_deleted,
            delete_requests: self.delete_requests,
            failed: self.failed,
        }
    }
}
