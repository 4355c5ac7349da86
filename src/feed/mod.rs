mod fetch;
mod parse;

pub use fetch::{
    fetch_episodes, fetch_feed_bytes, is_url, load_episodes, read_feed_file, try_fetch_episodes,
    try_load_episodes,
};
pub use parse::{FeedOptions, format_publish_date, parse_episodes, summarize_description};
