pub mod api_config;
pub mod cache_dir;
pub mod constants;
