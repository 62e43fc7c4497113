/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Output type for uploading a single object
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadOutput {
    /// Entity tag of the stored object
    pub e_tag: Option<String>,

    /// Version id created by the upload, present when versioning is enabled
    pub version_id: Option<String>,

    /// Number of bytes uploaded
    pub content_length: u64,
}

impl UploadOutput {
    /// Creates a new builder-style object to manufacture [`UploadOutput`](crate::operation::upload::UploadOutput).
    pub fn builder() -> UploadOutputBuilder {
        UploadOutputBuilder::default()
    }

    /// Entity tag of the stored object
    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }

    /// Version id created by the upload, present when versioning is enabled
    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    /// Number of bytes uploaded
    pub fn content_length(&self) -> u64 {
        self.content_length
    }
}

/// A builder for [`UploadOutput`](crate::operation::upload::UploadOutput).
#[non_exhaustive]
#[derive(Debug, Default)]
pub struct UploadOutputBuilder {
    pub(crate) e_tag: Option<String>,
    pub(crate) version_id: Option<String>,
    pub(crate) content_length: u64,
}

impl UploadOutputBuilder {
    /// Entity tag of the stored object
    pub fn e_tag(mut self, input: Option<String>) -> Self {
        self.e_tag = input;
        self
    }

    /// Version id created by the upload
    pub fn version_id(mut self, input: Option<String>) -> Self {
        self.version_id = input;
        self
    }

    /// Number of bytes uploaded
    pub fn content_length(mut self, input: u64) -> Self {
        self.content_length = input;
        self
    }

    /// Consume the builder and return the output
    pub fn build(self) -> UploadOutput {
        UploadOutput {
            e_tag: self.e_tag,
            version_id: self.version_id,
            content_length: self.content_length,
        }
    }
}
