use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheDirError {
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Platform-specific directory where fetched media is stored.
///
/// - macOS: `~/Library/Application Support/vidscribe/downloads/`
/// - Linux: `$XDG_CACHE_HOME/vidscribe/downloads/` or `~/.cache/vidscribe/downloads/`
/// - Windows: `%LOCALAPPDATA%/vidscribe/downloads/`
pub fn download_cache_dir() -> Result<PathBuf, CacheDirError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("vidscribe").join("downloads"))
            .ok_or(CacheDirError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("vidscribe").join("downloads"))
            .ok_or(CacheDirError::NoCacheDir)
    }
}
