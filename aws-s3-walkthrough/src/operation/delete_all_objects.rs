/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
/// Input type for removing every object version from a bucket
pub use input::{DeleteAllObjectsInput, DeleteAllObjectsInputBuilder};
mod output;
/// Output type for removing every object version from a bucket
pub use output::{DeleteAllObjectsOutput, DeleteAllObjectsOutputBuilder};

mod list_versions;
pub(crate) use list_versions::list_all_versions;

use std::sync::Arc;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::types::{FailedTransferPolicy, ObjectIdentifier};
pub use builders::DeleteAllObjectsFluentBuilder;

/// Operation struct for removing every object version from a bucket
#[derive(Clone, Default, Debug)]
pub(crate) struct DeleteAllObjects;

impl DeleteAllObjects {
    /// Execute a single `DeleteAllObjects` operation
    pub(crate) async fn orchestrate(
        handle: Arc<Handle>,
        input: DeleteAllObjectsInput,
    ) -> Result<DeleteAllObjectsOutput, Error> {
        let bucket = input.bucket.as_str();
        let versions = list_all_versions(&handle, bucket).await?;
        if versions.is_empty() {
            tracing::debug!(bucket, "no object versions to delete");
            return Ok(DeleteAllObjectsOutput::builder().build());
        }

        let identifiers: Vec<ObjectIdentifier> =
            versions.iter().map(|v| v.identifier()).collect();
        let mut output = DeleteAllObjectsOutput::builder();
        let mut objects_deleted = 0;
        let mut delete_requests = 0;

        for batch in identifiers.chunks(input.batch_size()) {
            let outcome = handle
                .storage()
                .delete_objects(bucket, batch.to_vec())
                .await?;
            delete_requests += 1;
            objects_deleted += outcome.deleted.len() as u64;

            if outcome.errors.is_empty() {
                continue;
            }
            match input.failure_policy {
                FailedTransferPolicy::Abort => {
                    let first = &outcome.errors[0];
                    let code = first.code.as_deref().unwrap_or("unknown");
                    let message = first.message.as_deref().unwrap_or("no message");
                    return Err(error::child_operation_failed(format!(
                        "{} of {} deletes failed in `{bucket}`, first `{}` ({code}): {message}",
                        outcome.errors.len(),
                        batch.len(),
                        first.identifier.key,
                    )));
                }
                FailedTransferPolicy::Continue => {
                    for failed in outcome.errors {
                        tracing::warn!(
                            bucket,
                            key = %failed.identifier.key,
                            version_id = ?failed.identifier.version_id,
                            code = ?failed.code,
                            "failed to delete object version"
                        );
                        output = output.failed(failed);
                    }
                }
            }
        }

        tracing::debug!(bucket, objects_deleted, delete_requests, "bucket emptied");
        Ok(output
            .objects_deleted(objects_deleted)
            .delete_requests(delete_requests)
            .build())
    }
}
