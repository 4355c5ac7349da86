// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::catalog::{Catalog, Episode};
use crate::error::PlaybackError;
use crate::observe::{SharedObserver, StateChange};

use super::media::MediaEventKind;

/// Shared playback state, owned by the [`Coordinator`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Display-order index of the current episode; always valid for the catalog
    pub current: usize,
    /// Bumped on every selection, including re-selecting the current episode
    pub selection: u64,
    pub is_playing: bool,
    /// Seconds into the current episode, within `0..=duration`
    pub position: f64,
    /// Seconds, as reported by the audio resource; 0 until it has loaded
    pub duration: f64,
    /// Output level in `0.0..=1.0`
    pub volume: f64,
    pub muted: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current: 0,
            selection: 0,
            is_playing: false,
            position: 0.0,
            duration: 0.0,
            volume: 1.0,
            muted: false,
        }
    }
}

/// Sole owner of the current episode and play state.
///
/// Views read through [`Coordinator::state`] and send intents through the
/// mutating methods; every change is broadcast to the observer.
pub struct Coordinator {
    catalog: Catalog,
    state: PlaybackState,
    observer: SharedObserver,
}

impl Coordinator {
    /// Start on the first catalog entry, paused
    pub fn new(catalog: Catalog, observer: SharedObserver) -> Self {
        Self {
            catalog,
            state: PlaybackState::default(),
            observer,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn current_episode(&self) -> &Episode {
        &self.catalog.episodes()[self.state.current]
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Make the given episode current and start playing it from the top
    pub fn select_episode(&mut self, id: &str) -> Result<(), PlaybackError> {
        let index = self
            .catalog
            .position(id)
            .ok_or_else(|| PlaybackError::UnknownEpisode { id: id.to_string() })?;

        self.switch_to(index);
        Ok(())
    }

    /// Flip the play/pause flag and return its new value
    pub fn toggle_play_pause(&mut self) -> bool {
        let playing = !self.state.is_playing;
        self.set_playing(playing);
        playing
    }

    /// Move to the next episode in display order, wrapping after the last
    pub fn advance_to_next(&mut self) {
        let next = self.catalog.next_index(self.state.current);
        self.switch_to(next);
    }

    /// Move the playback position, clamped to the known duration.
    ///
    /// Returns the stored position. The play flag is left alone.
    pub fn seek(&mut self, seconds: f64) -> f64 {
        if !seconds.is_nan() {
            self.set_position(seconds);
        }
        self.state.position
    }

    pub fn set_muted(&mut self, muted: bool) {
        if self.state.muted != muted {
            self.state.muted = muted;
            self.observer.notify(StateChange::MuteChanged { muted });
        }
    }

    /// Set the output level, clamped to `0.0..=1.0`; NaN is ignored
    pub fn set_volume(&mut self, volume: f64) {
        if volume.is_nan() {
            return;
        }

        let volume = volume.clamp(0.0, 1.0);
        if self.state.volume != volume {
            self.state.volume = volume;
            self.observer.notify(StateChange::VolumeChanged { volume });
        }
    }

    /// Reconcile state with something the audio resource reported
    pub fn handle_media_event(&mut self, event: &MediaEventKind) {
        match event {
            MediaEventKind::Loaded { duration } => self.set_duration(*duration),

            MediaEventKind::Playing => self.set_playing(true),

            MediaEventKind::PlayFailed { reason } | MediaEventKind::Failed { reason } => {
                let episode_id = self.current_episode().id.clone();
                log::warn!("Playback failed for episode '{}': {}", episode_id, reason);
                self.set_playing(false);
                self.observer.notify(StateChange::PlaybackFailed {
                    episode_id,
                    reason: reason.clone(),
                });
            }

            MediaEventKind::TimeUpdate { position, duration } => {
                self.set_duration(*duration);
                if !position.is_nan() {
                    self.set_position(*position);
                }
            }

            MediaEventKind::Ended => {
                self.set_position(self.state.duration);
                self.set_playing(false);
                self.observer.notify(StateChange::PlaybackEnded {
                    episode_id: self.current_episode().id.clone(),
                });
            }
        }
    }

    /// Drop back to paused without reporting a failure.
    ///
    /// Used when the player declines to start a freshly loaded source because
    /// the user has not interacted with the page yet.
    pub(crate) fn settle_paused(&mut self) {
        log::debug!(
            "Holding episode '{}' paused until the first user interaction",
            self.current_episode().id
        );
        self.set_playing(false);
    }

    fn switch_to(&mut self, index: usize) {
        self.state.current = index;
        self.state.selection = self.state.selection.wrapping_add(1);
        self.state.position = 0.0;
        self.state.duration = 0.0;

        let episode = self.current_episode();
        log::debug!("Switching to episode '{}'", episode.id);
        self.observer.notify(StateChange::EpisodeChanged {
            episode_id: episode.id.clone(),
            title: episode.title.clone(),
        });
        self.observer
            .notify(StateChange::PositionChanged { position: 0.0 });

        self.set_playing(true);
    }

    fn set_playing(&mut self, is_playing: bool) {
        if self.state.is_playing != is_playing {
            self.state.is_playing = is_playing;
            self.observer
                .notify(StateChange::PlayStateChanged { is_playing });
        }
    }

    fn set_position(&mut self, seconds: f64) {
        let position = seconds.clamp(0.0, self.state.duration);
        if self.state.position != position {
            self.state.position = position;
            self.observer.notify(StateChange::PositionChanged { position });
        }
    }

    fn set_duration(&mut self, duration: f64) {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };

        if self.state.duration != duration {
            self.state.duration = duration;
            self.observer.notify(StateChange::DurationChanged { duration });
            if self.state.position > duration {
                self.set_position(duration);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::observe::NoopObserver;
    use crate::observe::testing::RecordingObserver;

    fn coordinator() -> Coordinator {
        Coordinator::new(Catalog::builtin(), NoopObserver::shared())
    }

    fn loaded(duration: f64) -> MediaEventKind {
        MediaEventKind::Loaded { duration }
    }

    #[test]
    fn starts_on_first_episode_paused() {
        let c = coordinator();
        assert_eq!(c.current_episode().id, "1");
        assert!(!c.is_playing());
        assert_eq!(c.state().position, 0.0);
    }

    #[test]
    fn select_episode_makes_it_current_from_the_top() {
        let mut c = coordinator();
        let ids: Vec<String> = c.catalog().episodes().iter().map(|e| e.id.clone()).collect();

        for id in ids {
            c.handle_media_event(&loaded(120.0));
            c.seek(42.0);

            c.select_episode(&id).unwrap();

            assert_eq!(c.current_episode().id, id);
            assert_eq!(c.state().position, 0.0);
            assert!(c.is_playing());
        }
    }

    #[test]
    fn select_unknown_episode_is_rejected() {
        let mut c = coordinator();
        let result = c.select_episode("nope");

        assert_eq!(
            result,
            Err(PlaybackError::UnknownEpisode {
                id: "nope".to_string()
            })
        );
        assert_eq!(c.current_episode().id, "1");
        assert!(!c.is_playing());
    }

    #[test]
    fn advance_to_next_cycles_through_catalog() {
        let mut c = coordinator();
        c.select_episode("3").unwrap();
        let count = c.catalog().episodes().len();

        for _ in 0..count {
            c.advance_to_next();
        }

        assert_eq!(c.current_episode().id, "3");
    }

    #[test]
    fn advance_to_next_wraps_after_last() {
        let mut c = coordinator();
        c.select_episode("6").unwrap();
        c.advance_to_next();
        assert_eq!(c.current_episode().id, "1");
        assert!(c.is_playing());
    }

    #[test]
    fn toggle_twice_returns_to_paused() {
        let mut c = coordinator();
        assert!(c.toggle_play_pause());
        assert!(!c.toggle_play_pause());
        assert!(!c.is_playing());
    }

    #[test]
    fn seek_clamps_into_duration() {
        let mut c = coordinator();
        c.handle_media_event(&loaded(100.0));

        assert_eq!(c.seek(-5.0), 0.0);
        assert_eq!(c.seek(250.0), 100.0);
        assert_eq!(c.seek(33.5), 33.5);
        assert_eq!(c.seek(f64::NAN), 33.5);
    }

    #[test]
    fn seek_before_duration_is_known_stays_at_zero() {
        let mut c = coordinator();
        assert_eq!(c.seek(30.0), 0.0);
    }

    #[test]
    fn seek_keeps_play_flag() {
        let mut c = coordinator();
        c.handle_media_event(&loaded(100.0));
        c.toggle_play_pause();

        c.seek(50.0);
        assert!(c.is_playing());
    }

    #[test]
    fn volume_and_mute_are_independent_of_play_flag() {
        let mut c = coordinator();
        c.set_volume(1.7);
        assert_eq!(c.state().volume, 1.0);
        c.set_volume(-0.2);
        assert_eq!(c.state().volume, 0.0);
        c.set_volume(f64::NAN);
        assert_eq!(c.state().volume, 0.0);

        c.set_muted(true);
        assert!(c.state().muted);
        assert!(!c.is_playing());
    }

    #[test]
    fn play_failure_reverts_flag() {
        let observer = Arc::new(RecordingObserver::default());
        let mut c = Coordinator::new(Catalog::builtin(), observer.clone());

        c.toggle_play_pause();
        c.handle_media_event(&MediaEventKind::PlayFailed {
            reason: "blocked".to_string(),
        });

        assert!(!c.is_playing());
        assert!(observer.changes().contains(&StateChange::PlaybackFailed {
            episode_id: "1".to_string(),
            reason: "blocked".to_string(),
        }));
    }

    #[test]
    fn ended_counts_as_pause() {
        let mut c = coordinator();
        c.handle_media_event(&loaded(60.0));
        c.toggle_play_pause();

        c.handle_media_event(&MediaEventKind::TimeUpdate {
            position: 59.0,
            duration: 60.0,
        });
        c.handle_media_event(&MediaEventKind::Ended);

        assert!(!c.is_playing());
        assert_eq!(c.state().position, 60.0);
        assert_eq!(c.current_episode().id, "1");
    }

    #[test]
    fn shorter_duration_pulls_position_back() {
        let mut c = coordinator();
        c.handle_media_event(&loaded(100.0));
        c.seek(90.0);

        c.handle_media_event(&loaded(45.0));
        assert_eq!(c.state().position, 45.0);
    }

    #[test]
    fn switching_episode_broadcasts_changes() {
        let observer = Arc::new(RecordingObserver::default());
        let mut c = Coordinator::new(Catalog::builtin(), observer.clone());

        c.select_episode("2").unwrap();

        assert_eq!(
            observer.changes(),
            vec![
                StateChange::EpisodeChanged {
                    episode_id: "2".to_string(),
                    title: "NAIROBI DIARIES".to_string(),
                },
                StateChange::PositionChanged { position: 0.0 },
                StateChange::PlayStateChanged { is_playing: true },
            ]
        );
    }
}
