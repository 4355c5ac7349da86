pub mod carousel;
pub mod catalog;
pub mod error;
pub mod feed;
pub mod http;
pub mod observe;
pub mod playback;
pub mod title;
pub mod views;

// Re-export main types for convenience
pub use carousel::{Card, Carousel};
pub use catalog::{Catalog, CommunityPost, Episode, PostKind, community_posts};
pub use error::{CatalogError, FeedError, PlaybackError};
pub use feed::{FeedOptions, fetch_episodes, is_url, load_episodes, parse_episodes};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use observe::{LogObserver, NoopObserver, SharedObserver, StateChange, StateObserver};
pub use playback::{
    Coordinator, HeadlessMedia, Intent, MediaEvent, MediaEventKind, MediaResource, PlaybackState,
    PlayerSurface, Session, SessionOptions, format_time,
};
pub use title::{ParsedTitle, parse_episode_title};
pub use views::{DiscState, HeroView, TransportView};
