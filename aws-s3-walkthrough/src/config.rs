/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use aws_types::region::Region;

use crate::storage::{ObjectStorage, S3Storage, SharedStorage};

pub(crate) mod loader;

/// Configuration for a [`Client`](crate::client::Client)
#[derive(Debug, Clone)]
pub struct Config {
    region: Option<Region>,
    storage: SharedStorage,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The region new buckets are constrained to.
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// The storage backend requests are sent to.
    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    region: Option<Region>,
    storage: Option<SharedStorage>,
}

impl Builder {
    /// Set the region new buckets are constrained to.
    ///
    /// When using [`client`](Self::client) this defaults to the region the S3 client
    /// is configured for.
    pub fn region(self, region: Region) -> Self {
        self.set_region(Some(region))
    }

    /// Set the region new buckets are constrained to.
    pub fn set_region(mut self, region: Option<Region>) -> Self {
        self.region = region;
        self
    }

    /// Set an explicit S3 client to use.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        if self.region.is_none() {
            self.region = client.config().region().cloned();
        }
        self.storage = Some(Arc::new(S3Storage::new(client)));
        self
    }

    /// Use an arbitrary storage backend, e.g. [`InMemoryStorage`](crate::storage::InMemoryStorage).
    pub fn storage(self, storage: impl ObjectStorage + 'static) -> Self {
        self.shared_storage(Arc::new(storage))
    }

    /// Use an already shared storage backend.
    pub fn shared_storage(mut self, storage: SharedStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Consumes the builder and constructs a [`Config`]
    ///
    /// # Panics
    ///
    /// Panics if neither a client nor a storage backend was set.
    pub fn build(self) -> Config {
        Config {
            region: self.region,
            storage: self.storage.expect("client or storage set"),
        }
    }
}
