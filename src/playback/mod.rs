mod coordinator;
mod media;
mod session;
mod surface;
mod time;

pub use coordinator::{Coordinator, PlaybackState};
pub use media::{
    DEFAULT_HEADLESS_LENGTH, HeadlessMedia, MediaEvent, MediaEventKind, MediaResource,
    MediaSource, SourceToken,
};
pub use session::{Intent, Session, SessionOptions};
pub use surface::{PlayerSurface, SyncOutcome};
pub use time::{format_time, parse_display_duration};
