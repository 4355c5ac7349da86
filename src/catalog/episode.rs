// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Format used for publish dates throughout the catalog, e.g. "OCT 12, 2023"
pub const PUBLISH_DATE_FORMAT: &str = "%b %d, %Y";

/// A single podcast installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Display duration such as "42:10"; the audio resource is authoritative
    pub duration: String,
    pub audio_url: String,
    pub artwork_url: String,
    /// Publish date in "MON DD, YYYY" form, or empty when unknown
    pub publish_date: String,
    pub tags: Vec<String>,
}

impl Episode {
    /// Parse the display publish date, if it is in the catalog format
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.publish_date.trim(), PUBLISH_DATE_FORMAT).ok()
    }

    /// First tag, shown as the sleeve sticker in the carousel
    pub fn sticker(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }
}

/// The closed, ordered set of episodes available to a session.
///
/// Order is display order. A catalog always holds at least one episode so
/// that a current episode can exist from the moment playback state is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    episodes: Vec<Episode>,
}

impl Catalog {
    /// Build a catalog, rejecting empty input and duplicate ids
    pub fn new(episodes: Vec<Episode>) -> Result<Self, CatalogError> {
        if episodes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for episode in &episodes {
            if !seen.insert(episode.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: episode.id.clone(),
                });
            }
        }

        Ok(Self { episodes })
    }

    /// The catalog that ships with the site
    pub fn builtin() -> Self {
        Self {
            episodes: super::builtin::episodes(),
        }
    }

    /// All episodes in display order
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Display-order index of the episode with the given id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.episodes.iter().position(|episode| episode.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&Episode> {
        self.episodes.iter().find(|episode| episode.id == id)
    }

    /// Index following `index` in display order, wrapping after the last entry
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.episodes.len()
    }

    /// A copy of the catalog sorted by publish date, oldest first.
    ///
    /// Episodes without a parseable date sort last. The sort is stable, so
    /// ties keep their display order. Display order itself is untouched.
    pub fn chronological(&self) -> Vec<&Episode> {
        let mut sorted: Vec<&Episode> = self.episodes.iter().collect();
        sorted.sort_by_key(|episode| match episode.published_on() {
            Some(date) => (false, date),
            None => (true, NaiveDate::MIN),
        });
        sorted
    }

    /// 1-based chronological rank of an episode
    pub fn volume_number(&self, id: &str) -> Option<usize> {
        self.chronological()
            .iter()
            .position(|episode| episode.id == id)
            .map(|rank| rank + 1)
    }

    /// Volume label as printed on the carousel sleeves, e.g. "VOL. 03"
    pub fn volume_label(&self, id: &str) -> Option<String> {
        self.volume_number(id).map(format_volume)
    }
}

fn format_volume(number: usize) -> String {
    format!("VOL. {:02}", number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_episode(id: &str, publish_date: &str) -> Episode {
        Episode {
            id: id.to_string(),
            title: format!("Episode {}", id),
            description: String::new(),
            duration: "10:00".to_string(),
            audio_url: format!("https://example.com/{}.mp3", id),
            artwork_url: "https://example.com/art.jpg".to_string(),
            publish_date: publish_date.to_string(),
            tags: vec!["Side A".to_string()],
        }
    }

    #[test]
    fn catalog_rejects_empty_input() {
        assert_eq!(Catalog::new(vec![]), Err(CatalogError::Empty));
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            make_episode("a", "OCT 12, 2023"),
            make_episode("a", "OCT 19, 2023"),
        ]);

        assert_eq!(
            result,
            Err(CatalogError::DuplicateId {
                id: "a".to_string()
            })
        );
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(builtin.episodes().to_vec()).unwrap();
        assert_eq!(rebuilt, builtin);
    }

    #[test]
    fn next_index_wraps_to_first() {
        let catalog = Catalog::new(vec![
            make_episode("a", ""),
            make_episode("b", ""),
            make_episode("c", ""),
        ])
        .unwrap();

        assert_eq!(catalog.next_index(0), 1);
        assert_eq!(catalog.next_index(2), 0);
    }

    #[test]
    fn sticker_is_first_tag() {
        let mut episode = make_episode("a", "");
        assert_eq!(episode.sticker(), Some("Side A"));

        episode.tags.clear();
        assert_eq!(episode.sticker(), None);
    }

    #[test]
    fn published_on_parses_uppercase_month() {
        let episode = make_episode("a", "NOV 02, 2023");
        assert_eq!(
            episode.published_on(),
            NaiveDate::from_ymd_opt(2023, 11, 2)
        );
    }

    #[test]
    fn volume_number_ranks_by_publish_date_not_display_order() {
        let catalog = Catalog::new(vec![
            make_episode("late", "NOV 16, 2023"),
            make_episode("early", "OCT 12, 2023"),
            make_episode("middle", "OCT 26, 2023"),
        ])
        .unwrap();

        assert_eq!(catalog.volume_number("early"), Some(1));
        assert_eq!(catalog.volume_number("middle"), Some(2));
        assert_eq!(catalog.volume_number("late"), Some(3));
        assert_eq!(catalog.volume_number("missing"), None);

        // Ranking works on a copy
        assert_eq!(catalog.episodes()[0].id, "late");
    }

    #[test]
    fn undated_episodes_rank_last_in_display_order() {
        let catalog = Catalog::new(vec![
            make_episode("x", ""),
            make_episode("dated", "OCT 12, 2023"),
            make_episode("y", "not a date"),
        ])
        .unwrap();

        assert_eq!(catalog.volume_number("dated"), Some(1));
        assert_eq!(catalog.volume_number("x"), Some(2));
        assert_eq!(catalog.volume_number("y"), Some(3));
    }

    #[test]
    fn volume_label_pads_single_digits() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.volume_label("1"), Some("VOL. 01".to_string()));
        assert_eq!(format_volume(12), "VOL. 12");
    }
}
