// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only projections of playback state for the hero, the visual disc and
//! the transport bar.

use crate::playback::{Coordinator, format_time};
use crate::title::{ParsedTitle, parse_episode_title};

/// Scrubber range used before the resource has reported a duration
const UNKNOWN_DURATION_SCRUBBER_MAX: f64 = 100.0;

/// The record in the hero section; it only spins while audio plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscState {
    Spinning,
    Resting,
}

impl DiscState {
    pub fn from_playing(is_playing: bool) -> Self {
        if is_playing {
            DiscState::Spinning
        } else {
            DiscState::Resting
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeroView {
    pub volume_label: String,
    pub title: ParsedTitle,
    /// One headline line per word of the title
    pub headline: Vec<String>,
    pub description: String,
    pub button_caption: &'static str,
    pub disc: DiscState,
}

impl HeroView {
    pub fn from_coordinator(coordinator: &Coordinator) -> Self {
        let episode = coordinator.current_episode();
        let is_playing = coordinator.is_playing();

        Self {
            volume_label: coordinator
                .catalog()
                .volume_label(&episode.id)
                .unwrap_or_default(),
            title: parse_episode_title(&episode.title),
            headline: episode.title.split_whitespace().map(String::from).collect(),
            description: episode.description.clone(),
            button_caption: if is_playing { "Pause Chaos" } else { "Play Chaos" },
            disc: DiscState::from_playing(is_playing),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportView {
    pub now_spinning: String,
    /// "M:SS / M:SS"
    pub readout: String,
    pub scrubber_value: f64,
    pub scrubber_max: f64,
    /// The deck slides out of view while paused
    pub visible: bool,
    pub muted: bool,
    pub volume: f64,
}

impl TransportView {
    pub fn from_coordinator(coordinator: &Coordinator) -> Self {
        let state = coordinator.state();

        Self {
            now_spinning: coordinator.current_episode().title.clone(),
            readout: format!(
                "{} / {}",
                format_time(state.position),
                format_time(state.duration)
            ),
            scrubber_value: state.position,
            scrubber_max: if state.duration > 0.0 {
                state.duration
            } else {
                UNKNOWN_DURATION_SCRUBBER_MAX
            },
            visible: state.is_playing,
            muted: state.muted,
            volume: state.volume,
        }
    }
}
