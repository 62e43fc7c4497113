/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::client::Handle;
use crate::error::Error;
use crate::types::{ObjectVersionEntry, VersionMarker, VersionPage};

/// Paginator over every version and delete marker in a bucket.
#[derive(Debug)]
struct VersionPaginator<'a> {
    bucket: &'a str,
    state: Option<State>,
}

#[derive(Debug, PartialEq)]
enum State {
    Paginating { marker: Option<VersionMarker> },
    Done,
}

impl State {
    fn next_state(self, page: &VersionPage) -> State {
        match self {
            State::Paginating { .. } => match &page.next_marker {
                Some(marker) => State::Paginating {
                    marker: Some(marker.clone()),
                },
                None => State::Done,
            },
            State::Done => self,
        }
    }
}

impl<'a> VersionPaginator<'a> {
    fn new(bucket: &'a str) -> Self {
        Self {
            bucket,
            state: Some(State::Paginating { marker: None }),
        }
    }

    async fn next_page(&mut self, handle: &Handle) -> Option<Result<VersionPage, Error>> {
        let marker = match self.state.as_ref()? {
            State::Done => return None,
            State::Paginating { marker } => marker.clone(),
        };

        match handle
            .storage()
            .list_object_versions(self.bucket, marker)
            .await
        {
            Ok(page) => {
                let prev_state = self.state.take()?;
                self.state = Some(prev_state.next_state(&page));
                Some(Ok(page))
            }
            Err(err) => {
                self.state = Some(State::Done);
                Some(Err(err))
            }
        }
    }
}

/// Every version and delete marker in `bucket`, across all pages.
pub(crate) async fn list_all_versions(
    handle: &Handle,
    bucket: &str,
) -> Result<Vec<ObjectVersionEntry>, Error> {
    let mut paginator = VersionPaginator::new(bucket);
    let mut versions = Vec::new();
    let mut pages = 0;
    while let Some(page) = paginator.next_page(handle).await {
        versions.extend(page?.versions);
        pages += 1;
    }
    tracing::debug!(
        bucket,
        pages,
        count = versions.len(),
        "object versions listed"
    );
    Ok(versions)
}

#[cfg(test)]
mod tests {
    use super::State;
    use crate::types::{ObjectVersionEntry, VersionMarker, VersionPage};

    fn page(keys: &[&str], next: Option<(&str, &str)>) -> VersionPage {
        VersionPage {
            versions: keys
                .iter()
                .map(|key| ObjectVersionEntry {
                    key: key.to_string(),
                    version_id: "v".to_owned(),
                    is_latest: true,
                    is_delete_marker: false,
                })
                .collect(),
            next_marker: next.map(|(key, version_id)| VersionMarker {
                key: key.to_owned(),
                version_id: Some(version_id.to_owned()),
            }),
        }
    }

    #[test]
    fn test_next_state() {
        let start = State::Paginating { marker: None };

        let state2 = start.next_state(&page(&["k1", "k2"], Some(("k2", "v"))));
        assert_eq!(
            state2,
            State::Paginating {
                marker: Some(VersionMarker {
                    key: "k2".to_owned(),
                    version_id: Some("v".to_owned()),
                })
            }
        );

        let state3 = state2.next_state(&page(&["k3"], None));
        assert_eq!(state3, State::Done);

        // done is terminal
        let state4 = state3.next_state(&page(&["k4"], Some(("k4", "v"))));
        assert_eq!(state4, State::Done);
    }
}
