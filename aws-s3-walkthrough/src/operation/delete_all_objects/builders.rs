/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::error::Error;
use crate::types::FailedTransferPolicy;

use super::{DeleteAllObjectsInputBuilder, DeleteAllObjectsOutput};

/// Fluent builder for constructing an operation that removes every object version from a bucket
#[derive(Debug)]
pub struct DeleteAllObjectsFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: DeleteAllObjectsInputBuilder,
}

impl DeleteAllObjectsFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Empty the bucket
    pub async fn send(self) -> Result<DeleteAllObjectsOutput, Error> {
        let input = self.inner.build()?;
        crate::operation::delete_all_objects::DeleteAllObjects::orchestrate(self.handle, input)
            .await
    }

    /// The bucket to empty.
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.bucket(input);
        self
    }

    /// The bucket to empty.
    pub fn set_bucket(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_bucket(input);
        self
    }

    /// The bucket to empty.
    pub fn get_bucket(&self) -> &Option<String> {
        self.inner.get_bucket()
    }

    /// How to handle versions that the service refuses to delete.
    pub fn failure_policy(mut self, input: FailedTransferPolicy) -> Self {
        self.inner = self.inner.failure_policy(input);
        self
    }

    /// How to handle versions that the service refuses to delete.
    pub fn set_failure_policy(mut self, input: Option<FailedTransferPolicy>) -> Self {
        self.inner = self.inner.set_failure_policy(input);
        self
    }

    /// How to handle versions that the service refuses to delete.
    pub fn get_failure_policy(&self) -> &Option<FailedTransferPolicy> {
        self.inner.get_failure_policy()
    }

    /// Maximum number of versions sent in one delete request.
    pub fn batch_size(mut self, input: usize) -> Self {
        self.inner = self.inner.batch_size(input);
        self
    }
}

impl crate::operation::delete_all_objects::DeleteAllObjectsInputBuilder {
    /// Empty a bucket with this input using the given client.
    pub async fn send_with(self, client: &crate::Client) -> Result<DeleteAllObjectsOutput, Error> {
        let mut fluent_builder = client.delete_all_objects();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }
}
