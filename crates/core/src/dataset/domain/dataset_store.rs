use std::path::{Path, PathBuf};

use super::dataset_error::DatasetError;
use super::path_issue::{MissingPathIssue, SampleField};
use super::sample::Sample;

/// Domain interface for the append-only collection of evaluation samples.
///
/// Insertion order is significant and preserved; `id` uniqueness is the only
/// cross-record invariant.
pub trait DatasetStore: Send + Sync {
    /// Read every sample. A store that does not exist yet is an empty dataset.
    fn load(&self) -> Result<Vec<Sample>, DatasetError>;

    /// Append a sample, rejecting duplicate ids without touching stored state.
    ///
    /// Returns the placeholder files created for missing companion paths.
    fn add(&self, sample: Sample) -> Result<Vec<PathBuf>, DatasetError>;

    /// Map a path stored in a record to a location on disk.
    fn resolve_path(&self, stored: &Path) -> PathBuf;

    fn list(&self) -> Result<Vec<Sample>, DatasetError> {
        self.load()
    }

    /// Report every companion file that does not exist.
    fn validate(&self) -> Result<Vec<MissingPathIssue>, DatasetError> {
        let mut issues = Vec::new();
        for sample in self.load()? {
            for (field, stored) in [
                (SampleField::Transcript, &sample.transcript_path),
                (SampleField::Reference, &sample.reference_blog_path),
            ] {
                if !self.resolve_path(stored).exists() {
                    issues.push(MissingPathIssue {
                        sample_id: sample.id.clone(),
                        field,
                        path: stored.clone(),
                    });
                }
            }
        }
        Ok(issues)
    }
}
