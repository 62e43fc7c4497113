/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::PathBuf;

use aws_smithy_types::error::operation::BuildError;
use bytes::Bytes;

use crate::types::{ObjectCannedAcl, PutOptions, ServerSideEncryption, StorageClass};

/// Where the content of an upload comes from
#[derive(Debug, Clone, PartialEq)]
pub enum UploadSource {
    /// Read the content from a local file when the upload is sent
    Path(PathBuf),
    /// Upload an in-memory body
    Bytes(Bytes),
}

/// Input type for uploading a single object
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct UploadInput {
    /// The bucket name to which the object is uploaded.
    pub bucket: String,

    /// Object key under which the content is stored.
    pub key: String,

    /// Content to upload.
    pub source: UploadSource,

    /// ACL, encryption and storage class to apply.
    pub options: PutOptions,
}

impl UploadInput {
    /// Creates a new builder-style object to manufacture [`UploadInput`](crate::operation::upload::UploadInput).
    pub fn builder() -> UploadInputBuilder {
        UploadInputBuilder::default()
    }

    /// The bucket name to which the object is uploaded.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Object key under which the content is stored.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Content to upload.
    pub fn source(&self) -> &UploadSource {
        &self.source
    }

    /// ACL, encryption and storage class to apply.
    pub fn options(&self) -> &PutOptions {
        &self.options
    }
}

/// A builder for [`UploadInput`](crate::operation::upload::UploadInput).
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct UploadInputBuilder {
    pub(crate) bucket: Option<String>,
    pub(crate) key: Option<String>,
    pub(crate) source: Option<UploadSource>,
    pub(crate) options: PutOptions,
}

impl UploadInputBuilder {
    /// The bucket name to which the object is uploaded.
    ///
    /// This member is required.
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.bucket = Some(input.into());
        self
    }

    /// The bucket name to which the object is uploaded.
    pub fn set_bucket(mut self, input: Option<String>) -> Self {
        self.bucket = input;
        self
    }

    /// The bucket name to which the object is uploaded.
    pub fn get_bucket(&self) -> &Option<String> {
        &self.bucket
    }

    /// Object key under which the content is stored.
    ///
    /// This member is required.
    pub fn key(mut self, input: impl Into<String>) -> Self {
        self.key = Some(input.into());
        self
    }

    /// Object key under which the content is stored.
    pub fn set_key(mut self, input: Option<String>) -> Self {
        self.key = input;
        self
    }

    /// Object key under which the content is stored.
    pub fn get_key(&self) -> &Option<String> {
        &self.key
    }

    /// Upload the content of a local file.
    ///
    /// Either this or [`body`](Self::body) is required.
    pub fn source(mut self, input: impl Into<PathBuf>) -> Self {
        self.source = Some(UploadSource::Path(input.into()));
        self
    }

    /// Upload an in-memory body.
    pub fn body(mut self, input: impl Into<Bytes>) -> Self {
        self.source = Some(UploadSource::Bytes(input.into()));
        self
    }

    /// Content to upload.
    pub fn set_source(mut self, input: Option<UploadSource>) -> Self {
        self.source = input;
        self
    }

    /// Content to upload.
    pub fn get_source(&self) -> &Option<UploadSource> {
        &self.source
    }

    /// The canned ACL to apply to the object, e.g. `public-read`.
    pub fn acl(mut self, input: ObjectCannedAcl) -> Self {
        self.options.acl = Some(input);
        self
    }

    /// The canned ACL to apply to the object.
    pub fn set_acl(mut self, input: Option<ObjectCannedAcl>) -> Self {
        self.options.acl = input;
        self
    }

    /// The canned ACL to apply to the object.
    pub fn get_acl(&self) -> &Option<ObjectCannedAcl> {
        &self.options.acl
    }

    /// The server-side encryption algorithm used when storing this object, e.g. `AES256`.
    pub fn server_side_encryption(mut self, input: ServerSideEncryption) -> Self {
        self.options.server_side_encryption = Some(input);
        self
    }

    /// The server-side encryption algorithm used when storing this object.
    pub fn set_server_side_encryption(mut self, input: Option<ServerSideEncryption>) -> Self {
        self.options.server_side_encryption = input;
        self
    }

    /// The server-side encryption algorithm used when storing this object.
    pub fn get_server_side_encryption(&self) -> &Option<ServerSideEncryption> {
        &self.options.server_side_encryption
    }

    /// The storage class the object is stored in, e.g. `STANDARD_IA`.
    pub fn storage_class(mut self, input: StorageClass) -> Self {
        self.options.storage_class = Some(input);
        self
    }

    /// The storage class the object is stored in.
    pub fn set_storage_class(mut self, input: Option<StorageClass>) -> Self {
        self.options.storage_class = input;
        self
    }

    /// The storage class the object is stored in.
    pub fn get_storage_class(&self) -> &Option<StorageClass> {
        &self.options.storage_class
    }

    /// Consumes the builder and constructs a [`UploadInput`](crate::operation::upload::UploadInput).
    pub fn build(self) -> Result<UploadInput, BuildError> {
        Ok(UploadInput {
            bucket: self
                .bucket
                .ok_or_else(|| BuildError::missing_field("bucket", "A bucket is required"))?,
            key: self
                .key
                .ok_or_else(|| BuildError::missing_field("key", "A key is required"))?,
            source: self.source.ok_or_else(|| {
                BuildError::missing_field("source", "A source path or body is required")
            })?,
            options: self.options,
        })
    }
}
