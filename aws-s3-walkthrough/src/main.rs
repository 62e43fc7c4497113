/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::path::PathBuf;

use aws_s3_walkthrough::storage::InMemoryStorage;
use aws_s3_walkthrough::walkthrough::{self, WalkthroughConfig};
use aws_s3_walkthrough::{Client, Config};
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_types::region::Region;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Exercises buckets, objects, ACLs, encryption and versioning, then cleans up
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "s3-walkthrough")]
struct Args {
    /// Region to create buckets in (defaults to the environment / shared config)
    #[arg(long)]
    region: Option<String>,

    /// Shared config profile to load credentials and region from
    #[arg(long)]
    profile: Option<String>,

    /// Endpoint of an S3-compatible service to use instead of Amazon S3
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Run against an in-memory store instead of a remote service
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    in_memory: bool,

    /// Directory scratch files are written to
    #[arg(long, default_value = ".")]
    work_dir: PathBuf,

    /// Directory the first file is downloaded into
    #[arg(long, default_value = "/tmp")]
    download_dir: PathBuf,

    /// Prefix of the first bucket name
    #[arg(long, default_value = "firstrustbucket")]
    first_bucket_prefix: String,

    /// Prefix of the second bucket name
    #[arg(long, default_value = "secondrustbucket")]
    second_bucket_prefix: String,
}

async fn load_config(args: &Args) -> Config {
    let region = args.region.clone().map(Region::new);
    if args.in_memory {
        return Config::builder()
            .region(region.unwrap_or_else(|| Region::from_static("us-east-1")))
            .storage(InMemoryStorage::new())
            .build();
    }
    aws_s3_walkthrough::from_env()
        .region(region)
        .profile_name(args.profile.clone())
        .endpoint_url(args.endpoint_url.clone())
        .load()
        .await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("info"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let walkthrough_config = WalkthroughConfig {
        first_bucket_prefix: args.first_bucket_prefix.clone(),
        second_bucket_prefix: args.second_bucket_prefix.clone(),
        work_dir: args.work_dir.clone(),
        download_dir: args.download_dir.clone(),
    };

    let client = Client::new(load_config(&args).await);
    match walkthrough::run(&client, &walkthrough_config).await {
        Ok(report) => tracing::info!(
            first_bucket = %report.first_bucket,
            second_bucket = %report.second_bucket,
            requests = client.requests_sent(),
            "walkthrough complete"
        ),
        Err(err) => tracing::error!("unable to complete: {}", DisplayErrorContext(&err)),
    }
    drop(client);
}
