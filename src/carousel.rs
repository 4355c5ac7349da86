// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::catalog::{Catalog, Episode};
use crate::playback::Intent;

/// One sleeve in the carousel, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct Card<'a> {
    pub episode: &'a Episode,
    /// Chronological label such as "VOL. 02"
    pub volume_label: String,
    pub is_current: bool,
    /// Showing the detail side instead of the artwork
    pub is_flipped: bool,
}

/// Episode selector.
///
/// Cards keep catalog display order. The only state held here is which card,
/// if any, shows its detail side; it never touches playback.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    flipped: Option<String>,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flipped(&self) -> Option<&str> {
        self.flipped.as_deref()
    }

    pub fn is_flipped(&self, id: &str) -> bool {
        self.flipped.as_deref() == Some(id)
    }

    /// Flip a card, or flip it back if it is already showing its detail side.
    ///
    /// Flipping a different card turns the previous one back over.
    pub fn toggle_flip(&mut self, id: &str) -> bool {
        if self.is_flipped(id) {
            self.flipped = None;
            false
        } else {
            self.flipped = Some(id.to_string());
            true
        }
    }

    /// The intent sent when a card is clicked
    pub fn pick(&self, episode: &Episode) -> Intent {
        Intent::Select(episode.id.clone())
    }

    pub fn cards<'a>(&self, catalog: &'a Catalog, current_id: &str) -> Vec<Card<'a>> {
        catalog
            .episodes()
            .iter()
            .map(|episode| Card {
                episode,
                volume_label: catalog.volume_label(&episode.id).unwrap_or_default(),
                is_current: episode.id == current_id,
                is_flipped: self.is_flipped(&episode.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flipping_twice_restores_card() {
        let mut carousel = Carousel::new();

        assert!(carousel.toggle_flip("3"));
        assert!(carousel.is_flipped("3"));
        assert!(!carousel.toggle_flip("3"));
        assert!(!carousel.is_flipped("3"));
        assert_eq!(carousel.flipped(), None);
    }

    #[test]
    fn flipping_leaves_other_cards_alone() {
        let catalog = Catalog::builtin();
        let mut carousel = Carousel::new();

        carousel.toggle_flip("2");
        carousel.toggle_flip("2");

        let cards = carousel.cards(&catalog, "1");
        assert!(cards.iter().all(|card| !card.is_flipped));
    }

    #[test]
    fn flipping_another_card_moves_the_flip() {
        let mut carousel = Carousel::new();
        carousel.toggle_flip("2");
        carousel.toggle_flip("4");

        assert!(!carousel.is_flipped("2"));
        assert!(carousel.is_flipped("4"));
    }

    #[test]
    fn cards_follow_display_order_and_mark_current() {
        let catalog = Catalog::builtin();
        let carousel = Carousel::new();

        let cards = carousel.cards(&catalog, "4");
        let ids: Vec<&str> = cards.iter().map(|c| c.episode.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
        assert!(cards[3].is_current);
        assert_eq!(cards.iter().filter(|c| c.is_current).count(), 1);
        assert_eq!(cards[0].volume_label, "VOL. 01");
    }

    #[test]
    fn pick_selects_the_clicked_episode() {
        let catalog = Catalog::builtin();
        let carousel = Carousel::new();

        assert_eq!(
            carousel.pick(&catalog.episodes()[2]),
            Intent::Select("3".to_string())
        );
    }
}
