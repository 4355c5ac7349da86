use std::sync::Arc;

/// Changes to shared playback state, broadcast to read-only observers
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// A different episode became current
    EpisodeChanged { episode_id: String, title: String },

    /// The play/pause flag flipped
    PlayStateChanged { is_playing: bool },

    /// Playback position moved, by seeking or by the resource advancing
    PositionChanged { position: f64 },

    /// The audio resource reported its real length
    DurationChanged { duration: f64 },

    VolumeChanged { volume: f64 },

    MuteChanged { muted: bool },

    /// The audio resource refused to start; playback stays paused
    PlaybackFailed { episode_id: String, reason: String },

    /// The audio resource played to its end
    PlaybackEnded { episode_id: String },
}

/// Trait for observing playback state changes.
///
/// Implementations render views, log transitions, or collect events in
/// tests. Observers never mutate playback state.
pub trait StateObserver: Send + Sync {
    /// Receive a state change
    fn notify(&self, change: StateChange);
}

/// A shared reference to a state observer
pub type SharedObserver = Arc<dyn StateObserver>;

/// An observer that silently ignores all changes.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StateObserver for NoopObserver {
    fn notify(&self, _change: StateChange) {
        // Intentionally empty
    }
}

impl NoopObserver {
    /// Create a new NoopObserver wrapped in an Arc
    pub fn shared() -> SharedObserver {
        Arc::new(Self)
    }
}

/// An observer that forwards every change to the `log` facade at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl StateObserver for LogObserver {
    fn notify(&self, change: StateChange) {
        log::debug!("playback: {:?}", change);
    }
}

impl LogObserver {
    pub fn shared() -> SharedObserver {
        Arc::new(Self)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingObserver;
    use super::*;

    #[test]
    fn noop_observer_handles_all_changes() {
        let observer = NoopObserver;

        observer.notify(StateChange::EpisodeChanged {
            episode_id: "1".to_string(),
            title: "THE TALKING STAGE".to_string(),
        });
        observer.notify(StateChange::PlayStateChanged { is_playing: true });
        observer.notify(StateChange::PositionChanged { position: 12.5 });
        observer.notify(StateChange::DurationChanged { duration: 60.0 });
        observer.notify(StateChange::VolumeChanged { volume: 0.5 });
        observer.notify(StateChange::MuteChanged { muted: true });
        observer.notify(StateChange::PlaybackFailed {
            episode_id: "1".to_string(),
            reason: "blocked".to_string(),
        });
        observer.notify(StateChange::PlaybackEnded {
            episode_id: "1".to_string(),
        });
    }

    #[test]
    fn log_observer_is_shareable() {
        let observer: SharedObserver = LogObserver::shared();
        observer.notify(StateChange::PlaybackEnded {
            episode_id: "2".to_string(),
        });
    }

    #[test]
    fn recording_observer_keeps_order() {
        let observer = RecordingObserver::default();
        observer.notify(StateChange::MuteChanged { muted: true });
        observer.notify(StateChange::MuteChanged { muted: false });

        assert_eq!(
            observer.changes(),
            vec![
                StateChange::MuteChanged { muted: true },
                StateChange::MuteChanged { muted: false },
            ]
        );
    }
}
