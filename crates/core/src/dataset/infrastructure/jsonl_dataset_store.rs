use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::dataset::domain::dataset_error::DatasetError;
use crate::dataset::domain::dataset_store::DatasetStore;
use crate::dataset::domain::sample::Sample;

/// Dataset stored as UTF-8 text with one JSON object per line.
///
/// Blank lines are ignored on read. Every write rewrites the whole file
/// through a temp file and a rename, so a failed write leaves the previous
/// contents intact.
#[derive(Clone, Debug)]
pub struct JsonlDatasetStore {
    path: PathBuf,
    base_dir: Option<PathBuf>,
}

impl JsonlDatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            base_dir: None,
        }
    }

    /// Resolve relative companion paths against `base_dir` instead of the
    /// working directory.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, samples: &[Sample]) -> Result<(), DatasetError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DatasetError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut buffer = String::new();
        for sample in samples {
            let line = serde_json::to_string(sample).map_err(|e| DatasetError::Serialize {
                id: sample.id.clone(),
                source: e,
            })?;
            buffer.push_str(&line);
            buffer.push('\n');
        }

        let temp_path = self.path.with_extension("jsonl.part");
        let write_err = |path: &Path, e: std::io::Error| DatasetError::Write {
            path: path.to_path_buf(),
            source: e,
        };
        let mut file = fs::File::create(&temp_path).map_err(|e| write_err(&temp_path, e))?;
        file.write_all(buffer.as_bytes())
            .map_err(|e| write_err(&temp_path, e))?;
        file.flush().map_err(|e| write_err(&temp_path, e))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| write_err(&self.path, e))
    }
}

impl DatasetStore for JsonlDatasetStore {
    fn load(&self) -> Result<Vec<Sample>, DatasetError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| DatasetError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        let mut samples = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let sample = serde_json::from_str(line).map_err(|e| DatasetError::Parse {
                path: self.path.clone(),
                line: idx + 1,
                source: e,
            })?;
            samples.push(sample);
        }
        Ok(samples)
    }

    fn add(&self, sample: Sample) -> Result<Vec<PathBuf>, DatasetError> {
        let mut samples = self.load()?;
        if samples.iter().any(|s| s.id == sample.id) {
            return Err(DatasetError::DuplicateId(sample.id));
        }

        let mut created = Vec::new();
        for stored in [&sample.transcript_path, &sample.reference_blog_path] {
            let path = self.resolve_path(stored);
            if path.exists() {
                continue;
            }
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| DatasetError::Write {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
            fs::File::create(&path).map_err(|e| DatasetError::Write {
                path: path.clone(),
                source: e,
            })?;
            log::info!("Created empty placeholder at {}", path.display());
            created.push(path);
        }

        let id = sample.id.clone();
        samples.push(sample);
        self.write_all(&samples)?;
        log::info!("Added sample '{id}' to {}", self.path.display());
        Ok(created)
    }

    fn resolve_path(&self, stored: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if stored.is_relative() => base.join(stored),
            _ => stored.to_path_buf(),
        }
    }
}
