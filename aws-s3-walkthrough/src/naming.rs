/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use uuid::Uuid;

/// Number of hex characters used to prefix scratch file names.
const SCRATCH_PREFIX_LEN: usize = 6;

/// Append a freshly generated random UUID to `prefix`.
///
/// Bucket names live in a global namespace, so every bucket the walkthrough
/// creates gets one of these. The 122 random bits of a v4 UUID make collisions
/// between repeated calls with the same prefix negligible.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4())
}

/// A short random hex prefix for local scratch file names.
pub fn scratch_prefix() -> String {
    let mut simple = Uuid::new_v4().simple().to_string();
    simple.truncate(SCRATCH_PREFIX_LEN);
    simple
}
