// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::VecDeque;

use crate::catalog::Episode;

use super::time::parse_display_duration;

/// Length assumed by [`HeadlessMedia`] when nothing better is known
pub const DEFAULT_HEADLESS_LENGTH: f64 = 60.0;

/// Identifies one loaded source.
///
/// Every load mints a fresh token; events carrying an older token belong to
/// an abandoned source and are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SourceToken(u64);

impl SourceToken {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// What the player hands to the audio resource when switching episodes
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSource {
    pub url: String,
    /// Length derived from the episode's display duration, if it parses
    pub duration_hint: Option<f64>,
}

impl From<&Episode> for MediaSource {
    fn from(episode: &Episode) -> Self {
        Self {
            url: episode.audio_url.clone(),
            duration_hint: parse_display_duration(&episode.duration)
                .filter(|secs| *secs > 0)
                .map(|secs| secs as f64),
        }
    }
}

/// Something the audio resource reports back, asynchronously
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// Metadata is available; `duration` is authoritative from here on
    Loaded { duration: f64 },

    /// A play request succeeded
    Playing,

    /// A play request was refused, e.g. by an autoplay policy
    PlayFailed { reason: String },

    /// The resource itself failed (bad source, decode error)
    Failed { reason: String },

    TimeUpdate { position: f64, duration: f64 },

    /// Playback reached the end of the resource
    Ended,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub token: SourceToken,
    pub kind: MediaEventKind,
}

/// The single audio resource bound to the player.
///
/// Commands return immediately. Outcomes, including whether `play` actually
/// started, arrive later as [`MediaEvent`]s tagged with the token passed to
/// the most recent `load`.
pub trait MediaResource {
    /// Tear down the current source and start loading a new one
    fn load(&mut self, source: &MediaSource, token: SourceToken);

    /// Request playback; success or refusal is reported as an event
    fn play(&mut self);

    fn pause(&mut self);

    fn seek(&mut self, position: f64);

    fn set_muted(&mut self, muted: bool);

    fn set_volume(&mut self, volume: f64);

    /// Tell the resource a user gesture happened, for hosts that gate audio on one
    fn user_gesture(&mut self) {}
}

/// A media resource without audio output.
///
/// It keeps position and length, honours an autoplay policy that refuses
/// `play` until a user gesture has been seen, and queues the events a real
/// player would emit. Time only moves when [`HeadlessMedia::advance`] is called.
#[derive(Debug, Clone)]
pub struct HeadlessMedia {
    length: Option<f64>,
    block_autoplay: bool,
    gesture_seen: bool,
    token: SourceToken,
    source: Option<String>,
    playing: bool,
    position: f64,
    duration: f64,
    muted: bool,
    volume: f64,
    pending: VecDeque<MediaEvent>,
}

impl HeadlessMedia {
    /// Create a resource that takes each source's length from its duration hint
    pub fn new() -> Self {
        Self {
            length: None,
            block_autoplay: false,
            gesture_seen: false,
            token: SourceToken::default(),
            source: None,
            playing: false,
            position: 0.0,
            duration: 0.0,
            muted: false,
            volume: 1.0,
            pending: VecDeque::new(),
        }
    }

    /// Use a fixed length in seconds for every source
    pub fn with_length(mut self, seconds: f64) -> Self {
        self.length = Some(seconds.max(0.0));
        self
    }

    /// Refuse every play request, as a host with audio disabled would
    pub fn blocking_autoplay(mut self, block: bool) -> Self {
        self.block_autoplay = block;
        self
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Let `seconds` of wall time pass
    pub fn advance(&mut self, seconds: f64) {
        if !self.playing || !seconds.is_finite() || seconds <= 0.0 {
            return;
        }

        self.position = (self.position + seconds).min(self.duration);
        self.emit(MediaEventKind::TimeUpdate {
            position: self.position,
            duration: self.duration,
        });

        if self.position >= self.duration {
            self.playing = false;
            self.emit(MediaEventKind::Ended);
        }
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<MediaEvent> {
        self.pending.drain(..).collect()
    }

    fn refuse(&mut self, reason: &str) {
        self.emit(MediaEventKind::PlayFailed {
            reason: reason.to_string(),
        });
    }

    fn emit(&mut self, kind: MediaEventKind) {
        self.pending.push_back(MediaEvent {
            token: self.token,
            kind,
        });
    }
}

impl Default for HeadlessMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaResource for HeadlessMedia {
    fn load(&mut self, source: &MediaSource, token: SourceToken) {
        self.token = token;
        self.playing = false;
        self.position = 0.0;

        if source.url.is_empty() {
            self.source = None;
            self.duration = 0.0;
            self.emit(MediaEventKind::Failed {
                reason: "episode has no audio source".to_string(),
            });
            return;
        }

        self.source = Some(source.url.clone());
        self.duration = self
            .length
            .or(source.duration_hint)
            .unwrap_or(DEFAULT_HEADLESS_LENGTH);
        self.emit(MediaEventKind::Loaded {
            duration: self.duration,
        });
    }

    fn play(&mut self) {
        if self.source.is_none() {
            return self.refuse("no source loaded");
        }
        if self.block_autoplay || !self.gesture_seen {
            return self.refuse("play request blocked by autoplay policy");
        }

        // Playing a finished source starts it over
        if self.duration > 0.0 && self.position >= self.duration {
            self.position = 0.0;
            self.emit(MediaEventKind::TimeUpdate {
                position: 0.0,
                duration: self.duration,
            });
        }

        self.playing = true;
        self.emit(MediaEventKind::Playing);
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, position: f64) {
        if position.is_finite() {
            self.position = position.clamp(0.0, self.duration);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn user_gesture(&mut self) {
        self.gesture_seen = true;
    }
}
