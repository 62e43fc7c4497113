/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{self, Error};
use crate::naming::scratch_prefix;

/// Write `content` repeated `size` times to a new file in `dir`.
///
/// The file is named `<6 random hex chars><file_name>` and its path is returned.
/// Scratch files are left in place for the caller to inspect or remove.
pub async fn create_scratch_file(
    dir: impl AsRef<Path>,
    size: usize,
    file_name: &str,
    content: &str,
) -> Result<PathBuf, Error> {
    if file_name.is_empty() || file_name.contains(['/', '\\']) {
        return Err(error::invalid_input(format!(
            "scratch file name `{file_name}` must be a plain, non-empty file name"
        )));
    }
    if content.len().checked_mul(size).is_none() {
        return Err(error::invalid_input(format!(
            "{size} copies of a {}-byte pattern overflow the scratch file size",
            content.len()
        )));
    }

    let path = dir
        .as_ref()
        .join(format!("{}{file_name}", scratch_prefix()));
    fs::write(&path, content.repeat(size)).await?;
    tracing::debug!(path = %path.display(), size, "created scratch file");
    Ok(path)
}

/// The file name portion of a scratch file path, used as its object key.
pub fn scratch_key(path: &Path) -> Result<String, Error> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
        .ok_or_else(|| {
            error::invalid_input(format!("`{}` has no UTF-8 file name", path.display()))
        })
}
