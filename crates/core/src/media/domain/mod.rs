pub mod fetch_error;
pub mod media_fetcher;
pub mod video_id;
