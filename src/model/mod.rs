//! Record types for the site's JSON stores.

pub mod news;
pub mod profile;
pub mod publication;

pub use news::{
    NEWS_DATE_FORMAT, NEWS_ID_PREFIX, NewsCategory, NewsDraft, NewsError, NewsIcon, NewsItem,
    add_news_item, format_news_id, news_id_number, next_news_id, parse_news_date,
};
pub use profile::{MIN_RECOMMENDED_DELAY_SECS, ProfileSettings, ScholarProfile};
pub use publication::{
    FALLBACK_YEAR, MergeOutcome, Publication, UNKNOWN_VENUE, merge_publications,
    sort_newest_first,
};
