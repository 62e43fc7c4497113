/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;

use crate::error::Error;
use crate::types::{ObjectCannedAcl, ServerSideEncryption, StorageClass};

use super::{UploadInputBuilder, UploadOutput};

/// Fluent builder for constructing a single object upload
#[derive(Debug)]
pub struct UploadFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: UploadInputBuilder,
}

impl UploadFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Send the upload
    pub async fn send(self) -> Result<UploadOutput, Error> {
        let input = self.inner.build()?;
        crate::operation::upload::Upload::orchestrate(self.handle, input).await
    }

    /// The bucket name to which the object is uploaded.
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.bucket(input);
        self
    }

    /// The bucket name to which the object is uploaded.
    pub fn get_bucket(&self) -> &Option<String> {
        self.inner.get_bucket()
    }

    /// Object key under which the content is stored.
    pub fn key(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.key(input);
        self
    }

    /// Object key under which the content is stored.
    pub fn get_key(&self) -> &Option<String> {
        self.inner.get_key()
    }

    /// Upload the content of a local file.
    pub fn source(mut self, input: impl Into<PathBuf>) -> Self {
        self.inner = self.inner.source(input);
        self
    }

    /// Upload an in-memory body.
    pub fn body(mut self, input: impl Into<Bytes>) -> Self {
        self.inner = self.inner.body(input);
        self
    }

    /// The canned ACL to apply to the object.
    pub fn acl(mut self, input: ObjectCannedAcl) -> Self {
        self.inner = self.inner.acl(input);
        self
    }

    /// The canned ACL to apply to the object.
    pub fn set_acl(mut self, input: Option<ObjectCannedAcl>) -> Self {
        self.inner = self.inner.set_acl(input);
        self
    }

    /// The server-side encryption algorithm used when storing this object.
    pub fn server_side_encryption(mut self, input: ServerSideEncryption) -> Self {
        self.inner = self.inner.server_side_encryption(input);
        self
    }

    /// The server-side encryption algorithm used when storing this object.
    pub fn set_server_side_encryption(mut self, input: Option<ServerSideEncryption>) -> Self {
        self.inner = self.inner.set_server_side_encryption(input);
        self
    }

    /// The storage class the object is stored in.
    pub fn storage_class(mut self, input: StorageClass) -> Self {
        self.inner = self.inner.storage_class(input);
        self
    }

    /// The storage class the object is stored in.
    pub fn set_storage_class(mut self, input: Option<StorageClass>) -> Self {
        self.inner = self.inner.set_storage_class(input);
        self
    }
}

impl crate::operation::upload::UploadInputBuilder {
    /// Send an upload with this input using the given client.
    pub async fn send_with(self, client: &crate::Client) -> Result<UploadOutput, Error> {
        let mut fluent_builder = client.upload();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }
}
