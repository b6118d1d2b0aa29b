use std::fs;
use std::path::{Path, PathBuf};

use crate::evaluation::domain::output_resolver::{OutputResolver, ResolveError, ResolveRequest};
use crate::shared::constants::CACHED_OUTPUT_EXTENSIONS;

/// Reads previously generated articles from `<dir>/<sample_id>.<ext>`.
///
/// Extensions are tried in `CACHED_OUTPUT_EXTENSIONS` order and the first
/// existing file wins. Content is returned trimmed.
pub struct CachedOutputResolver {
    generated_dir: PathBuf,
}

impl CachedOutputResolver {
    pub fn new(generated_dir: impl Into<PathBuf>) -> Self {
        Self {
            generated_dir: generated_dir.into(),
        }
    }

    pub fn generated_dir(&self) -> &Path {
        &self.generated_dir
    }

    fn candidate(&self, sample_id: &str) -> Option<PathBuf> {
        CACHED_OUTPUT_EXTENSIONS
            .iter()
            .map(|ext| self.generated_dir.join(format!("{sample_id}.{ext}")))
            .find(|path| path.is_file())
    }
}

impl OutputResolver for CachedOutputResolver {
    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<String, ResolveError> {
        let path = self
            .candidate(request.sample_id)
            .ok_or_else(|| ResolveError::MissingCachedOutput {
                sample_id: request.sample_id.to_string(),
                dir: self.generated_dir.clone(),
            })?;
        log::debug!("Using cached output {}", path.display());

        let text = fs::read_to_string(&path).map_err(|source| ResolveError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(text.trim().to_string())
    }
}
