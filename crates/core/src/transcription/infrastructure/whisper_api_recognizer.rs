use std::path::{Path, PathBuf};

use reqwest::blocking::multipart::Form;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::shared::api_config::ApiConfig;
use crate::shared::constants::DEFAULT_TRANSCRIPTION_MODEL;
use crate::transcription::domain::model_size::ModelSize;
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;
use crate::transcription::domain::transcription_error::TranscriptionError;

const SIZE_PLACEHOLDER: &str = "{size}";

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Speech recognizer backed by an OpenAI-compatible `/audio/transcriptions`
/// endpoint.
///
/// The model name may contain `{size}`, which is replaced by the requested
/// [`ModelSize`] (e.g. `Systran/faster-whisper-{size}` on a self-hosted
/// server). Hosted models without the placeholder ignore the size.
#[derive(Debug)]
pub struct WhisperApiRecognizer {
    client: Client,
    config: ApiConfig,
    model: String,
}

impl WhisperApiRecognizer {
    pub fn new(client: Client, config: ApiConfig) -> Self {
        Self {
            client,
            config,
            model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn model_for(&self, size: ModelSize) -> String {
        self.model.replace(SIZE_PLACEHOLDER, size.as_str())
    }
}

impl SpeechRecognizer for WhisperApiRecognizer {
    fn transcribe(
        &self,
        audio_path: &Path,
        model_size: ModelSize,
    ) -> Result<String, TranscriptionError> {
        if !audio_path.exists() {
            return Err(TranscriptionError::AudioNotFound(audio_path.to_path_buf()));
        }

        let model = self.model_for(model_size);
        log::info!("Transcribing {} with {model}", audio_path.display());
        let form = Form::new()
            .text("model", model)
            .file("file", audio_path)
            .map_err(|e| TranscriptionError::AudioRead {
                path: PathBuf::from(audio_path),
                source: e,
            })?;

        let mut request = self
            .client
            .post(self.config.endpoint("audio/transcriptions"))
            .multipart(form);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptionError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let parsed: TranscriptionResponse = response.json()?;
        let text = parsed.text.trim().to_string();
        if text.is_empty() {
            return Err(TranscriptionError::Empty);
        }
        Ok(text)
    }
}
