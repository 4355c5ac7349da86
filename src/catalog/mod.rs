mod builtin;
mod community;
mod episode;

pub use builtin::{SAMPLE_AUDIO, community_posts};
pub use community::{CommunityPost, PostKind};
pub use episode::{Catalog, Episode, PUBLISH_DATE_FORMAT};
