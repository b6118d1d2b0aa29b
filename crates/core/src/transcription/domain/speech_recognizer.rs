use std::path::Path;

use super::model_size::ModelSize;
use super::transcription_error::TranscriptionError;

/// Domain interface for speech-to-text transcription.
///
/// Implementations turn an audio file into plain transcript text.
pub trait SpeechRecognizer: Send + Sync {
    fn transcribe(
        &self,
        audio_path: &Path,
        model_size: ModelSize,
    ) -> Result<String, TranscriptionError>;
}
