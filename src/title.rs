// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::LazyLock;

use regex::Regex;

static EPISODE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(EP\s+\d+:)").expect("valid prefix pattern"));

/// An episode title split for multi-line display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTitle {
    /// Uppercased "EP N:" marker, or empty when the title has none
    pub prefix: String,
    pub first_half: String,
    pub second_half: String,
}

/// Split a title into its "EP N:" marker and two halves of the remaining words.
///
/// The first half takes the extra word when the count is odd.
pub fn parse_episode_title(title: &str) -> ParsedTitle {
    let (prefix, remaining) = match EPISODE_PREFIX.find(title) {
        Some(marker) => (
            marker.as_str().to_uppercase(),
            title[marker.end()..].trim(),
        ),
        None => (String::new(), title),
    };

    let words: Vec<&str> = remaining.split(' ').filter(|w| !w.is_empty()).collect();
    let mid = words.len().div_ceil(2);

    ParsedTitle {
        prefix,
        first_half: words[..mid].join(" "),
        second_half: words[mid..].join(" "),
    }
}
