// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::carousel::Carousel;
use crate::catalog::Catalog;
use crate::error::PlaybackError;
use crate::observe::SharedObserver;

use super::coordinator::Coordinator;
use super::media::{HeadlessMedia, MediaEvent, MediaResource};
use super::surface::{PlayerSurface, SyncOutcome};

/// Options for a playback session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Output level at start, in `0.0..=1.0`
    pub initial_volume: f64,
    pub start_muted: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            start_muted: false,
        }
    }
}

/// Something the user asked for, from any view
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Select(String),
    TogglePlayPause,
    Next,
    Seek(f64),
    SetMuted(bool),
    SetVolume(f64),
}

/// One page session: the coordinator, the player bound to the audio
/// resource, and the carousel's local card state.
pub struct Session<M: MediaResource> {
    coordinator: Coordinator,
    surface: PlayerSurface<M>,
    carousel: Carousel,
}

impl<M: MediaResource> Session<M> {
    pub fn new(
        catalog: Catalog,
        media: M,
        options: &SessionOptions,
        observer: SharedObserver,
    ) -> Self {
        let mut coordinator = Coordinator::new(catalog, observer);
        coordinator.set_volume(options.initial_volume);
        coordinator.set_muted(options.start_muted);

        let mut surface = PlayerSurface::new(media);
        surface.apply_output(coordinator.state().volume, coordinator.state().muted);

        let mut session = Self {
            coordinator,
            surface,
            carousel: Carousel::new(),
        };
        session.sync_surface();
        session
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn surface(&self) -> &PlayerSurface<M> {
        &self.surface
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn media(&self) -> &M {
        self.surface.media()
    }

    pub fn media_mut(&mut self) -> &mut M {
        self.surface.media_mut()
    }

    /// Apply a user intent and bring the audio resource along
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), PlaybackError> {
        self.surface.record_interaction();

        match intent {
            Intent::Select(id) => self.coordinator.select_episode(&id)?,
            Intent::TogglePlayPause => {
                self.coordinator.toggle_play_pause();
            }
            Intent::Next => self.coordinator.advance_to_next(),
            Intent::Seek(seconds) => {
                let position = self.coordinator.seek(seconds);
                self.surface.seek(position);
            }
            Intent::SetMuted(muted) => {
                self.coordinator.set_muted(muted);
                self.apply_output();
            }
            Intent::SetVolume(volume) => {
                self.coordinator.set_volume(volume);
                self.apply_output();
            }
        }

        self.sync_surface();
        Ok(())
    }

    /// Flip a carousel card's detail view; returns whether it is now flipped
    pub fn flip_card(&mut self, id: &str) -> Result<bool, PlaybackError> {
        if self.coordinator.catalog().find(id).is_none() {
            return Err(PlaybackError::UnknownEpisode { id: id.to_string() });
        }
        Ok(self.carousel.toggle_flip(id))
    }

    /// Feed one event from the audio resource back into the state
    pub fn handle_media_event(&mut self, event: &MediaEvent) {
        if self.surface.accept(event) {
            self.coordinator.handle_media_event(&event.kind);
        }
    }

    fn apply_output(&mut self) {
        let state = self.coordinator.state();
        self.surface.apply_output(state.volume, state.muted);
    }

    fn sync_surface(&mut self) {
        let outcome = self
            .surface
            .sync(self.coordinator.state(), self.coordinator.current_episode());

        if outcome == SyncOutcome::AutoplayHeld {
            self.coordinator.settle_paused();
        }
    }
}

impl Session<HeadlessMedia> {
    /// Deliver every event the headless resource has queued
    pub fn pump(&mut self) {
        for event in self.surface.media_mut().drain_events() {
            self.handle_media_event(&event);
        }
    }

    /// Let time pass on the headless resource, then deliver its events
    pub fn tick(&mut self, seconds: f64) {
        self.surface.media_mut().advance(seconds);
        self.pump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::NoopObserver;
    use crate::views::TransportView;

    fn session() -> Session<HeadlessMedia> {
        let mut session = Session::new(
            Catalog::builtin(),
            HeadlessMedia::new().with_length(60.0),
            &SessionOptions::default(),
            NoopObserver::shared(),
        );
        session.pump();
        session
    }

    #[test]
    fn new_session_loads_first_episode_paused() {
        let s = session();

        assert_eq!(s.coordinator().current_episode().id, "1");
        assert!(!s.coordinator().is_playing());
        assert_eq!(s.coordinator().state().duration, 60.0);
        assert!(!s.surface().has_interacted());
    }

    #[test]
    fn options_set_initial_output() {
        let s = Session::new(
            Catalog::builtin(),
            HeadlessMedia::new(),
            &SessionOptions {
                initial_volume: 0.25,
                start_muted: true,
            },
            NoopObserver::shared(),
        );

        assert_eq!(s.coordinator().state().volume, 0.25);
        assert!(s.coordinator().state().muted);
        assert_eq!(s.media().volume(), 0.25);
        assert!(s.media().is_muted());
    }

    #[test]
    fn toggle_starts_the_resource() {
        let mut s = session();
        s.dispatch(Intent::TogglePlayPause).unwrap();
        s.pump();

        assert!(s.coordinator().is_playing());
        assert!(s.media().is_playing());
        assert!(s.surface().has_interacted());
    }

    #[test]
    fn seek_during_playback_keeps_playing() {
        let mut s = session();
        s.dispatch(Intent::TogglePlayPause).unwrap();
        s.pump();

        s.dispatch(Intent::Seek(30.0)).unwrap();
        s.tick(5.0);

        assert!(s.coordinator().is_playing());
        assert_eq!(s.coordinator().state().position, 35.0);
    }

    #[test]
    fn play_after_end_restarts_from_the_top() {
        let mut s = Session::new(
            Catalog::builtin(),
            HeadlessMedia::new().with_length(10.0),
            &SessionOptions::default(),
            NoopObserver::shared(),
        );
        s.pump();
        s.dispatch(Intent::TogglePlayPause).unwrap();
        s.pump();
        s.tick(20.0);
        assert_eq!(s.coordinator().state().position, 10.0);
        assert!(!s.coordinator().is_playing());

        s.dispatch(Intent::TogglePlayPause).unwrap();
        s.pump();

        assert!(s.coordinator().is_playing());
        assert_eq!(s.coordinator().state().position, 0.0);
        assert_eq!(s.media().position(), 0.0);
        assert_eq!(
            TransportView::from_coordinator(s.coordinator()).readout,
            "0:00 / 0:10"
        );
    }

    #[test]
    fn mute_and_volume_reach_the_resource() {
        let mut s = session();
        s.dispatch(Intent::SetMuted(true)).unwrap();
        s.dispatch(Intent::SetVolume(0.4)).unwrap();

        assert!(s.media().is_muted());
        assert_eq!(s.media().volume(), 0.4);
        assert!(!s.coordinator().is_playing());
    }

    #[test]
    fn flip_card_rejects_unknown_episode() {
        let mut s = session();
        assert!(s.flip_card("99").is_err());
        assert_eq!(s.flip_card("2"), Ok(true));
    }
}
