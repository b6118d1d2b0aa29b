pub mod yt_dlp_fetcher;
