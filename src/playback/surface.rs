// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::catalog::Episode;

use super::coordinator::PlaybackState;
use super::media::{MediaEvent, MediaEventKind, MediaResource, MediaSource, SourceToken};

/// Outcome of bringing the audio resource in line with playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The resource now follows the state (a play request may be in flight)
    InSync,
    /// A new source was loaded while the state says "playing", but the user has
    /// not interacted yet, so no play request was made
    AutoplayHeld,
}

/// Transport side of the player: binds the single audio resource to the
/// current episode.
pub struct PlayerSurface<M: MediaResource> {
    media: M,
    token: SourceToken,
    /// Selection whose source is currently loaded
    loaded_selection: Option<u64>,
    has_interacted: bool,
    /// Whether we last asked the resource to play (true) or pause (false)
    requested_playing: bool,
}

impl<M: MediaResource> PlayerSurface<M> {
    pub fn new(media: M) -> Self {
        Self {
            media,
            token: SourceToken::default(),
            loaded_selection: None,
            has_interacted: false,
            requested_playing: false,
        }
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn has_interacted(&self) -> bool {
        self.has_interacted
    }

    /// Token of the source currently loaded
    pub fn token(&self) -> SourceToken {
        self.token
    }

    /// Remember that the user did something on the page
    pub fn record_interaction(&mut self) {
        if !self.has_interacted {
            self.has_interacted = true;
            self.media.user_gesture();
        }
    }

    /// Bring the resource in line with `state`.
    ///
    /// A new selection is loaded before any play request is made. After a
    /// source swap, playback resumes only once the user has interacted.
    pub fn sync(&mut self, state: &PlaybackState, episode: &Episode) -> SyncOutcome {
        let switched = self.loaded_selection != Some(state.selection);

        if switched {
            self.token = self.token.next();
            log::debug!(
                "Loading '{}' for episode '{}'",
                episode.audio_url,
                episode.id
            );
            self.media.load(&MediaSource::from(episode), self.token);
            self.loaded_selection = Some(state.selection);
            self.requested_playing = false;
        }

        if state.is_playing && !self.requested_playing {
            if switched && !self.has_interacted {
                return SyncOutcome::AutoplayHeld;
            }
            self.media.play();
            self.requested_playing = true;
        } else if !state.is_playing && self.requested_playing {
            self.media.pause();
            self.requested_playing = false;
        }

        SyncOutcome::InSync
    }

    pub fn seek(&mut self, position: f64) {
        self.media.seek(position);
    }

    pub fn apply_output(&mut self, volume: f64, muted: bool) {
        self.media.set_volume(volume);
        self.media.set_muted(muted);
    }

    /// Decide whether a resource event still applies.
    ///
    /// Events from an earlier source are stale, as is a late "playing" report
    /// after a pause was requested.
    pub fn accept(&mut self, event: &MediaEvent) -> bool {
        if event.token != self.token {
            log::debug!("Dropping stale media event {:?}", event.kind);
            return false;
        }

        match event.kind {
            MediaEventKind::Playing => self.requested_playing,
            MediaEventKind::PlayFailed { .. }
            | MediaEventKind::Failed { .. }
            | MediaEventKind::Ended => {
                self.requested_playing = false;
                true
            }
            MediaEventKind::Loaded { .. } | MediaEventKind::TimeUpdate { .. } => true,
        }
    }
}
