use std::fmt;
use std::path::PathBuf;

/// Which companion file of a sample a path refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleField {
    Transcript,
    Reference,
}

impl SampleField {
    /// Record field name as stored in the dataset file.
    pub fn field_name(self) -> &'static str {
        match self {
            SampleField::Transcript => "transcript_path",
            SampleField::Reference => "reference_blog_path",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SampleField::Transcript => "transcript",
            SampleField::Reference => "reference",
        }
    }
}

/// A referenced companion file that does not exist on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingPathIssue {
    pub sample_id: String,
    pub field: SampleField,
    pub path: PathBuf,
}

impl fmt::Display for MissingPathIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Missing {} for {}: {}",
            self.field.label(),
            self.sample_id,
            self.path.display()
        )
    }
}
