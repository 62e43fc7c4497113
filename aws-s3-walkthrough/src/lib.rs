/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! A guided tour of the everyday Amazon S3 bucket and object operations.
//!
//! The crate wraps an object storage backend (Amazon S3 through the AWS SDK, or an
//! in-memory emulation) behind a small [`Client`] facade: create buckets with a region
//! constraint, upload and download files, copy objects between buckets, toggle ACLs,
//! server-side encryption, storage class and versioning, enumerate buckets and objects,
//! and tear everything down again.
//!
//! # Examples
//!
//! Load the default configuration and create a bucket:
//!
//! ```no_run
//! # async fn example() -> Result<(), aws_s3_walkthrough::error::Error> {
//! let config = aws_s3_walkthrough::from_env().load().await;
//! let client = aws_s3_walkthrough::Client::new(config);
//!
//! let bucket = client.create_bucket("firstrustbucket").await?;
//! println!("created {} in {}", bucket.bucket_name(), bucket.region());
//! # Ok(())
//! # }
//! ```
//!
//! Run the whole tour against the in-memory backend:
//!
//! ```no_run
//! # async fn example() -> Result<(), aws_s3_walkthrough::error::Error> {
//! use aws_s3_walkthrough::storage::InMemoryStorage;
//! use aws_s3_walkthrough::walkthrough::{self, WalkthroughConfig};
//!
//! let config = aws_s3_walkthrough::Config::builder()
//!     .region(aws_types::region::Region::from_static("eu-west-1"))
//!     .storage(InMemoryStorage::new())
//!     .build();
//! let client = aws_s3_walkthrough::Client::new(config);
//!
//! let report = walkthrough::run(&client, &WalkthroughConfig::default()).await?;
//! println!("{report:?}");
//! # Ok(())
//! # }
//! ```

/// Error types emitted by `aws-s3-walkthrough`
pub mod error;

/// Common types used by `aws-s3-walkthrough`
pub mod types;

/// Storage backends the client talks to
pub mod storage;

/// Unique bucket and file name generation
pub mod naming;

/// Local scratch files used as upload sources
pub mod scratch;

/// Walkthrough client
pub mod client;

/// Walkthrough operations
pub mod operation;

/// The end-to-end bucket and object tour
pub mod walkthrough;

/// Client configuration
pub mod config;

pub use self::client::Client;
pub use self::config::Config;

use self::config::loader::ConfigLoader;

/// Load default config from the environment
pub fn from_env() -> ConfigLoader {
    ConfigLoader::default()
}
