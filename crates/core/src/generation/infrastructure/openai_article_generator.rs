use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generation::domain::article_generator::{Article, ArticleGenerator, GenerationOutcome};
use crate::generation::domain::prompt::{
    build_prompt, fit_transcript, PromptTokenizer, SYSTEM_PROMPT,
};
use crate::generation::domain::tone::Tone;
use crate::generation::infrastructure::tiktoken_tokenizer::{TiktokenTokenizer, TokenizerLoadError};
use crate::shared::api_config::ApiConfig;
use crate::shared::constants::{
    DEFAULT_CHAT_MODEL, GENERATION_MAX_TOKENS, GENERATION_TEMPERATURE, TRANSCRIPT_TOKEN_BUDGET,
};

#[derive(Error, Debug)]
enum ChatError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model returned empty content")]
    EmptyContent,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

/// Article generator backed by an OpenAI-compatible chat completions API.
pub struct OpenAiArticleGenerator {
    client: Client,
    config: ApiConfig,
    model: String,
    tokenizer: Box<dyn PromptTokenizer>,
    token_budget: usize,
}

impl OpenAiArticleGenerator {
    /// `client` is the run-wide HTTP client; cloning it shares the pool.
    pub fn new(client: Client, config: ApiConfig) -> Result<Self, TokenizerLoadError> {
        Ok(Self {
            client,
            config,
            model: DEFAULT_CHAT_MODEL.to_string(),
            tokenizer: Box::new(TiktokenTokenizer::for_model(DEFAULT_CHAT_MODEL)?),
            token_budget: TRANSCRIPT_TOKEN_BUDGET,
        })
    }

    /// Switches the model and loads its tokenizer.
    pub fn with_model(mut self, model: impl Into<String>) -> Result<Self, TokenizerLoadError> {
        self.model = model.into();
        self.tokenizer = Box::new(TiktokenTokenizer::for_model(&self.model)?);
        Ok(self)
    }

    pub fn with_token_budget(mut self, budget: usize) -> Self {
        self.token_budget = budget.max(1);
        self
    }

    fn request(&self, prompt: String) -> Result<ChatResponse, ChatError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(prompt),
                },
            ],
            max_tokens: GENERATION_MAX_TOKENS,
            temperature: GENERATION_TEMPERATURE,
        };

        let mut request = self
            .client
            .post(self.config.endpoint("chat/completions"))
            .json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json()?)
    }
}

fn article_from_response(
    response: ChatResponse,
    tone: Tone,
    truncated: bool,
) -> Result<Article, ChatError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .unwrap_or_default();
    if content.is_empty() {
        return Err(ChatError::EmptyContent);
    }
    Ok(Article {
        blog_post: content,
        tokens_used: response.usage.map(|u| u.total_tokens),
        model: response.model,
        tone,
        truncated,
    })
}

impl ArticleGenerator for OpenAiArticleGenerator {
    fn generate(&self, transcript: &str, tone: Tone) -> GenerationOutcome {
        let budgeted = fit_transcript(transcript, tone, self.token_budget, self.tokenizer.as_ref());
        if budgeted.truncated {
            log::warn!(
                "Prompt exceeds {} tokens; transcript cut to its first {} tokens",
                self.token_budget,
                self.token_budget
            );
        }

        let prompt = build_prompt(&budgeted.text, tone);
        match self
            .request(prompt)
            .and_then(|r| article_from_response(r, tone, budgeted.truncated))
        {
            Ok(article) => {
                log::debug!(
                    "Generated {} chars with {} ({:?} tokens)",
                    article.blog_post.len(),
                    article.model,
                    article.tokens_used
                );
                GenerationOutcome::Success(article)
            }
            Err(e) => GenerationOutcome::failure(e.to_string()),
        }
    }
}
