// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use bytes::Bytes;
use url::Url;

use crate::catalog::Episode;
use crate::error::FeedError;
use crate::http::HttpClient;

use super::parse::{FeedOptions, parse_episodes};

/// Fetch raw feed bytes from a URL (without parsing)
pub async fn fetch_feed_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes, FeedError> {
    Url::parse(url)?;

    let response = client
        .get(url)
        .await
        .map_err(|e| FeedError::FetchFailed {
            url: url.to_string(),
            source: e,
        })?;

    if !response.is_success() {
        return Err(FeedError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    Ok(response.body)
}

/// Read raw feed bytes from a local file (without parsing)
pub fn read_feed_file(path: &Path) -> Result<Vec<u8>, FeedError> {
    std::fs::read(path).map_err(|e| FeedError::FileReadFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Fetch and map a remote feed, surfacing every failure
pub async fn try_fetch_episodes<C: HttpClient>(
    client: &C,
    url: &str,
    options: &FeedOptions,
) -> Result<Vec<Episode>, FeedError> {
    let bytes = fetch_feed_bytes(client, url).await?;
    parse_episodes(&bytes, options)
}

/// Fetch and map a remote feed.
///
/// An unreachable or malformed feed yields an empty list; callers fall back
/// to another catalog in that case.
pub async fn fetch_episodes<C: HttpClient>(
    client: &C,
    url: &str,
    options: &FeedOptions,
) -> Vec<Episode> {
    recover(try_fetch_episodes(client, url, options).await)
}

/// Load episodes from a URL or a local RSS file, surfacing every failure
pub async fn try_load_episodes<C: HttpClient>(
    client: &C,
    source: &str,
    options: &FeedOptions,
) -> Result<Vec<Episode>, FeedError> {
    if is_url(source) {
        try_fetch_episodes(client, source, options).await
    } else {
        let bytes = read_feed_file(Path::new(source))?;
        parse_episodes(&bytes, options)
    }
}

/// Load episodes from a URL or a local RSS file, degrading to an empty list
pub async fn load_episodes<C: HttpClient>(
    client: &C,
    source: &str,
    options: &FeedOptions,
) -> Vec<Episode> {
    recover(try_load_episodes(client, source, options).await)
}

fn recover(result: Result<Vec<Episode>, FeedError>) -> Vec<Episode> {
    match result {
        Ok(episodes) => {
            log::info!("Loaded {} episodes from feed", episodes.len());
            episodes
        }
        Err(e) => {
            log::warn!("Error fetching episodes: {}", e);
            Vec::new()
        }
    }
}

/// Determine if a string is a URL or a file path
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
