/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_types::region::Region;

use crate::Config;

/// Load walkthrough [`Config`] from the environment.
#[derive(Default, Debug)]
pub struct ConfigLoader {
    region: Option<Region>,
    profile_name: Option<String>,
    endpoint_url: Option<String>,
}

impl ConfigLoader {
    /// Override the region resolved from the environment.
    pub fn region(mut self, region: impl Into<Option<Region>>) -> Self {
        self.region = region.into();
        self
    }

    /// Load credentials and region from the named shared config profile.
    pub fn profile_name(mut self, profile_name: impl Into<Option<String>>) -> Self {
        self.profile_name = profile_name.into();
        self
    }

    /// Send requests to an S3-compatible endpoint instead of Amazon S3.
    ///
    /// Path-style addressing is enabled when an endpoint is given.
    pub fn endpoint_url(mut self, endpoint_url: impl Into<Option<String>>) -> Self {
        self.endpoint_url = endpoint_url.into();
        self
    }

    /// Load the default configuration
    ///
    /// If fields have been overridden during builder construction, the override values will be
    /// used. Otherwise, the default values for each field will be provided.
    pub async fn load(self) -> Config {
        let mut loader = aws_config::from_env();
        if let Some(region) = self.region {
            loader = loader.region(region);
        }
        if let Some(profile_name) = &self.profile_name {
            loader = loader.profile_name(profile_name);
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let shared_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(self.endpoint_url.is_some())
            .build();
        let s3_client = aws_sdk_s3::Client::from_conf(s3_config);

        Config::builder()
            .set_region(shared_config.region().cloned())
            .client(s3_client)
            .build()
    }
}
