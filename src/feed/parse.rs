// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use rand::Rng;
use regex::Regex;

use crate::catalog::{Episode, PUBLISH_DATE_FORMAT};
use crate::error::FeedError;

/// Length of the token minted for items that carry no guid
const GENERATED_ID_LENGTH: usize = 6;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("valid tag pattern"));

/// Options controlling how feed items are mapped onto episodes
#[derive(Debug, Clone)]
pub struct FeedOptions {
    /// Maximum number of characters kept from the description
    pub description_limit: usize,
    /// Artwork used when an item has no `itunes:image`
    pub fallback_artwork: String,
    /// Display duration used when an item has no `itunes:duration`
    pub fallback_duration: String,
    /// Tags attached to every feed episode
    pub default_tags: Vec<String>,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            description_limit: 200,
            fallback_artwork: "https://picsum.photos/600/600".to_string(),
            fallback_duration: "00:00".to_string(),
            default_tags: vec!["Podcast".to_string(), "New".to_string()],
        }
    }
}

/// Parse RSS feed XML bytes into episodes, in feed order
pub fn parse_episodes(xml_bytes: &[u8], options: &FeedOptions) -> Result<Vec<Episode>, FeedError> {
    let channel = rss::Channel::read_from(xml_bytes)?;

    // Generated ids must not shadow a guid that appears further down
    let feed_guids: HashSet<&str> = channel.items().iter().filter_map(item_guid).collect();

    let mut assigned_ids = HashSet::new();
    let mut episodes = Vec::with_capacity(channel.items().len());

    for item in channel.items() {
        let id = match item_guid(item) {
            Some(guid) if assigned_ids.contains(guid) => {
                log::warn!("Skipping feed item with duplicate guid '{}'", guid);
                continue;
            }
            Some(guid) => guid.to_string(),
            None => generate_unique_id(|token| {
                feed_guids.contains(token) || assigned_ids.contains(token)
            }),
        };

        assigned_ids.insert(id.clone());
        episodes.push(map_item(item, id, options));
    }

    Ok(episodes)
}

fn item_guid(item: &rss::Item) -> Option<&str> {
    item.guid().map(|g| g.value().trim()).filter(|g| !g.is_empty())
}

fn map_item(item: &rss::Item, id: String, options: &FeedOptions) -> Episode {
    let title = item
        .title()
        .map(String::from)
        .unwrap_or_else(|| "Untitled Episode".to_string());

    let description = summarize_description(
        item.description().unwrap_or_default(),
        options.description_limit,
    );

    let publish_date = item
        .pub_date()
        .and_then(parse_pub_date)
        .map(format_publish_date)
        .unwrap_or_default();

    let audio_url = item
        .enclosure()
        .map(|enclosure| enclosure.url().to_string())
        .unwrap_or_default();

    let itunes = item.itunes_ext();

    let artwork_url = itunes
        .and_then(|ext| ext.image())
        .filter(|url| !url.is_empty())
        .map(String::from)
        .unwrap_or_else(|| options.fallback_artwork.clone());

    let duration = itunes
        .and_then(|ext| ext.duration())
        .filter(|d| !d.is_empty())
        .map(String::from)
        .unwrap_or_else(|| options.fallback_duration.clone());

    Episode {
        id,
        title,
        description,
        duration,
        audio_url,
        artwork_url,
        publish_date,
        tags: options.default_tags.clone(),
    }
}

/// Strip markup from a description and cut it to `limit` characters.
///
/// The ellipsis is appended unconditionally, matching how the site renders
/// feed descriptions.
pub fn summarize_description(html: &str, limit: usize) -> String {
    let stripped = HTML_TAG.replace_all(html, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    let mut summary: String = decoded.chars().take(limit).collect();
    summary.push_str("...");
    summary
}

/// Format a date the way the catalog displays it, e.g. "NOV 02, 2023"
pub fn format_publish_date(date: DateTime<FixedOffset>) -> String {
    date.format(PUBLISH_DATE_FORMAT).to_string().to_uppercase()
}

fn parse_pub_date(date_str: &str) -> Option<DateTime<FixedOffset>> {
    let date_str = date_str.trim();
    DateTime::parse_from_rfc2822(date_str)
        .ok()
        .or_else(|| parse_relaxed_date(date_str))
}

/// Try to parse dates that don't strictly conform to RFC 2822
fn parse_relaxed_date(date_str: &str) -> Option<DateTime<FixedOffset>> {
    let formats = [
        "%a, %d %b %Y %H:%M:%S %z",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%d %H:%M:%S %z",
    ];

    formats
        .iter()
        .find_map(|format| DateTime::parse_from_str(date_str, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(date_str).ok())
}

/// Mint a short base-36 token for which `is_taken` is false
fn generate_unique_id(is_taken: impl Fn(&str) -> bool) -> String {
    let mut rng = rand::thread_rng();
    first_free(is_taken, || random_token(&mut rng))
}

fn random_token(rng: &mut impl Rng) -> String {
    (0..GENERATED_ID_LENGTH)
        .filter_map(|_| std::char::from_digit(rng.gen_range(0..36), 36))
        .collect()
}

fn first_free(is_taken: impl Fn(&str) -> bool, mut mint: impl FnMut() -> String) -> String {
    loop {
        let token = mint();
        if !is_taken(&token) {
            return token;
        }
    }
}
