use std::borrow::Cow;

use super::tone::Tone;

pub const SYSTEM_PROMPT: &str =
    "You are a professional content writer who creates engaging blog posts from video transcripts.";

/// Encodes and decodes text in the chat model's token space.
pub trait PromptTokenizer: Send + Sync {
    fn encode(&self, text: &str) -> Vec<u32>;
    /// `None` when the tokens do not decode to valid UTF-8.
    fn decode(&self, tokens: &[u32]) -> Option<String>;
}

/// Transcript as it will be placed in the prompt.
#[derive(Debug, PartialEq)]
pub struct BudgetedTranscript<'a> {
    pub text: Cow<'a, str>,
    pub truncated: bool,
}

/// Fit `transcript` into the prompt for `tone`.
///
/// Nothing changes while the whole user prompt stays within `budget` model
/// tokens. Past that, the transcript is cut to its first `budget` tokens.
pub fn fit_transcript<'a>(
    transcript: &'a str,
    tone: Tone,
    budget: usize,
    tokenizer: &dyn PromptTokenizer,
) -> BudgetedTranscript<'a> {
    let untouched = BudgetedTranscript {
        text: Cow::Borrowed(transcript),
        truncated: false,
    };
    if tokenizer.encode(&build_prompt(transcript, tone)).len() <= budget {
        return untouched;
    }
    let tokens = tokenizer.encode(transcript);
    if tokens.len() <= budget {
        return untouched;
    }

    // A cut inside a multi-byte character does not decode; back off to the
    // previous boundary.
    let mut end = budget;
    while end > 0 {
        if let Some(text) = tokenizer.decode(&tokens[..end]) {
            return BudgetedTranscript {
                text: Cow::Owned(text),
                truncated: true,
            };
        }
        end -= 1;
    }
    BudgetedTranscript {
        text: Cow::Owned(String::new()),
        truncated: true,
    }
}

/// User prompt asking for a structured article in the given tone.
pub fn build_prompt(transcript: &str, tone: Tone) -> String {
    format!(
        "Please convert the following transcript from a YouTube video into a well-structured blog post.\n\
         {instruction}\n\
         \n\
         The blog post should include:\n\
         1. An engaging introduction\n\
         2. Clear sections with headings\n\
         3. Key points from the transcript\n\
         4. A conclusion that summarizes the main points\n\
         5. A call-to-action or thought-provoking question\n\
         \n\
         Transcript:\n\
         {transcript}\n",
        instruction = tone.instruction(),
    )
}
