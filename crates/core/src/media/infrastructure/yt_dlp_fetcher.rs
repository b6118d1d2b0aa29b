use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::media::domain::fetch_error::FetchError;
use crate::media::domain::media_fetcher::MediaFetcher;
use crate::media::domain::video_id::{extract_video_id, normalize_source};

const DEFAULT_PROGRAM: &str = "yt-dlp";
const AUDIO_FORMAT: &str = "mp3";

/// Fetches audio by running the `yt-dlp` executable.
///
/// The file is named after the video id, so repeated fetches of the same
/// video reuse the existing download.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    program: String,
}

impl YtDlpFetcher {
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn expected_path(output_dir: &Path, video_id: &str) -> PathBuf {
        output_dir.join(format!("{video_id}.{AUDIO_FORMAT}"))
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaFetcher for YtDlpFetcher {
    fn fetch(&self, source: &str, output_dir: &Path) -> Result<PathBuf, FetchError> {
        let url = normalize_source(source);
        let video_id = extract_video_id(&url);
        let target = Self::expected_path(output_dir, &video_id);
        if target.exists() {
            log::info!("Audio already downloaded: {}", target.display());
            return Ok(target);
        }

        fs::create_dir_all(output_dir).map_err(|e| FetchError::OutputDir {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

        log::info!("Fetching audio for {url}");
        let template = output_dir.join(format!("{video_id}.%(ext)s"));
        let output = Command::new(&self.program)
            .arg("--extract-audio")
            .args(["--audio-format", AUDIO_FORMAT])
            .arg("--no-progress")
            .arg("--output")
            .arg(&template)
            .arg(&url)
            .output()
            .map_err(|e| FetchError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FetchError::classify(&stderr));
        }

        if !target.exists() {
            return Err(FetchError::MissingOutput(target));
        }
        log::info!("Download complete: {}", target.display());
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_download_is_reused() {
        let tmp = TempDir::new().unwrap();
        let existing = tmp.path().join("abc123.mp3");
        fs::write(&existing, b"audio").unwrap();

        let fetcher = YtDlpFetcher::new().with_program("/nonexistent/yt-dlp");
        let path = fetcher
            .fetch("https://youtu.be/abc123", tmp.path())
            .unwrap();
        assert_eq!(path, existing);
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let tmp = TempDir::new().unwrap();
        let fetcher = YtDlpFetcher::new().with_program("/nonexistent/yt-dlp");
        let err = fetcher.fetch("abc123", tmp.path()).unwrap_err();
        assert!(matches!(err, FetchError::Spawn { .. }));
    }

    #[test]
    fn test_expected_path_uses_video_id() {
        let path = YtDlpFetcher::expected_path(Path::new("downloads"), "xyz");
        assert_eq!(path, PathBuf::from("downloads/xyz.mp3"));
    }
}
