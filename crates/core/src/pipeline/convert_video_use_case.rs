use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;

use crate::generation::domain::article_generator::{Article, ArticleGenerator, GenerationOutcome};
use crate::generation::domain::tone::Tone;
use crate::media::domain::fetch_error::FetchError;
use crate::media::domain::media_fetcher::MediaFetcher;
use crate::transcription::domain::model_size::ModelSize;
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;
use crate::transcription::domain::transcription_error::TranscriptionError;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error("article generation failed: {0}")]
    Generation(String),
}

/// Everything produced by one conversion.
#[derive(Clone, Debug)]
pub struct Conversion {
    pub audio_path: PathBuf,
    pub transcript: String,
    pub article: Article,
}

/// Video-to-article pipeline: fetch audio → transcribe → generate.
pub struct ConvertVideoUseCase {
    fetcher: Box<dyn MediaFetcher>,
    recognizer: Box<dyn SpeechRecognizer>,
    generator: Box<dyn ArticleGenerator>,
}

impl ConvertVideoUseCase {
    pub fn new(
        fetcher: Box<dyn MediaFetcher>,
        recognizer: Box<dyn SpeechRecognizer>,
        generator: Box<dyn ArticleGenerator>,
    ) -> Self {
        Self {
            fetcher,
            recognizer,
            generator,
        }
    }

    pub fn execute(
        &self,
        source: &str,
        download_dir: &Path,
        model_size: ModelSize,
        tone: Tone,
    ) -> Result<Conversion, ConvertError> {
        let t0 = Instant::now();
        let audio_path = self.fetcher.fetch(source, download_dir)?;
        log::info!(
            "Fetched audio to {} in {:.1}s",
            audio_path.display(),
            t0.elapsed().as_secs_f64()
        );

        let t0 = Instant::now();
        let transcript = self.recognizer.transcribe(&audio_path, model_size)?;
        log::info!(
            "Transcribed {} words with the {model_size} model in {:.1}s",
            transcript.split_whitespace().count(),
            t0.elapsed().as_secs_f64()
        );

        let t0 = Instant::now();
        let article = match self.generator.generate(&transcript, tone) {
            GenerationOutcome::Success(article) => article,
            GenerationOutcome::Error { message } => return Err(ConvertError::Generation(message)),
        };
        log::info!(
            "Generated {tone} article with {} in {:.1}s",
            article.model,
            t0.elapsed().as_secs_f64()
        );

        Ok(Conversion {
            audio_path,
            transcript,
            article,
        })
    }
}
