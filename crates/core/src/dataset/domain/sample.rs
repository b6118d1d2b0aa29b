use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::generation::domain::tone::Tone;
use crate::shared::constants::DEFAULT_TONE;

/// One evaluation test case: a transcript, a human-written reference
/// article, and metadata about the source video.
///
/// Companion files are referenced by path only; the dataset never owns them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: String,
    #[serde(default)]
    pub video_title: String,
    #[serde(default)]
    pub video_url: String,
    pub transcript_path: PathBuf,
    pub reference_blog_path: PathBuf,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default)]
    pub notes: String,
}

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

impl Sample {
    pub fn new(
        id: impl Into<String>,
        transcript_path: impl Into<PathBuf>,
        reference_blog_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            video_title: String::new(),
            video_url: String::new(),
            transcript_path: transcript_path.into(),
            reference_blog_path: reference_blog_path.into(),
            tone: default_tone(),
            notes: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.video_title = title.into();
        self
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = url.into();
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Generation tone for this sample. Unknown labels fall back to professional.
    pub fn parsed_tone(&self) -> Tone {
        Tone::parse(&self.tone)
    }
}
